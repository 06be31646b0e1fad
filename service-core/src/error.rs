use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::error_json;

/// Why a credential was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No credential cookie on the request.
    Missing,
    /// Cookie present but unparseable, wrongly signed or expired.
    Invalid,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0:?}")]
    Unauthorized(AuthFailure),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Signing error: {0}")]
    SigningError(anyhow::Error),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl AppError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The one-line message sent to the caller. Internal causes stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(AuthFailure::Missing) => "Unauthorized".to_string(),
            AppError::Unauthorized(AuthFailure::Invalid) => "Invalid token".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::MethodNotAllowed(_) => "Method not allowed".to_string(),
            AppError::SigningError(_) => "Failed to create token".to_string(),
            AppError::ProviderError(msg) => msg.clone(),
            AppError::ConfigError(_) => "Configuration error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_json(self.status_code(), self.client_message())
    }
}
