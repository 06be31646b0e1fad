pub mod logging;

pub use logging::{init_tracing, LOG_TIMESTAMP_FORMAT};
