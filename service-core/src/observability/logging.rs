use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Millisecond RFC 3339 timestamps in UTC, e.g. `2025-01-31T09:15:02.417Z`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Install the global subscriber: one flattened JSON record per event.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_tracing(service_name: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoUtc::new(LOG_TIMESTAMP_FORMAT.to_string()))
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .init();

    tracing::info!(service = service_name, "Tracing initialized");
}
