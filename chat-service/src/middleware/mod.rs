pub mod auth;

pub use auth::{auth_middleware, CREDENTIAL_COOKIE};
