use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use service_core::error::{AppError, AuthFailure};

use crate::startup::AppState;

/// Name of the cookie carrying the credential.
pub const CREDENTIAL_COOKIE: &str = "auth_token";

/// Reject requests without a valid credential cookie, otherwise pass them
/// through untouched. Claims are not forwarded to the inner handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(CREDENTIAL_COOKIE)
        .map(|cookie| cookie.value())
        .ok_or_else(|| {
            tracing::debug!(path = %req.uri().path(), "Missing credential cookie");
            AppError::Unauthorized(AuthFailure::Missing)
        })?;

    state.tokens.verify(token)?;

    Ok(next.run(req).await)
}
