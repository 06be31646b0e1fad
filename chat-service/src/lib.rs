//! chat-service: a chat relay in front of an OpenAI-compatible completion API,
//! gated by a signed cookie credential.
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

/// Name reported in logs and on `/health`.
pub const SERVICE_NAME: &str = "chat-service";
