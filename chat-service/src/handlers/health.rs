use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use service_core::response::write_json;

use crate::SERVICE_NAME;

/// Liveness probe. The service has no backing store, so being up is enough.
pub async fn health_check() -> Response {
    write_json(
        StatusCode::OK,
        &json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }),
    )
}
