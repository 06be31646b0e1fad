use axum::{
    body,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use service_core::response::write_json;

use crate::models::{ChatRequest, ChatResponse};
use crate::startup::AppState;

/// `/api/chat`: POST a question, get the provider's answer back.
///
/// Mounted for every method so that anything but POST gets a JSON 405. The
/// body is only read once the method has been accepted, and is not capped.
pub async fn chat_handler(State(state): State<AppState>, req: Request) -> Response {
    match relay_question(&state, req).await {
        Ok(answer) => write_json(StatusCode::OK, &ChatResponse { answer }),
        Err(e) => e.into_response(),
    }
}

async fn relay_question(state: &AppState, req: Request) -> Result<String, AppError> {
    if req.method() != Method::POST {
        tracing::warn!(method = %req.method(), "Invalid request method");
        return Err(AppError::MethodNotAllowed(req.method().to_string()));
    }

    let bytes = body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read request body");
            AppError::BadRequest("Invalid request payload".to_string())
        })?;

    let request = ChatRequest::decode(&bytes).map_err(|e| {
        tracing::error!(error = %e, "Invalid request payload");
        AppError::BadRequest("Invalid request payload".to_string())
    })?;

    state.relay.ask(&request.question).await
}
