use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service_core::error::AppError;

use crate::middleware::CREDENTIAL_COOKIE;
use crate::startup::AppState;

/// Issue a fresh credential unconditionally and store it in the cookie jar.
pub async fn init_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    let token = state.tokens.issue().map_err(|e| {
        tracing::error!(error = %e, "Failed to create credential");
        e
    })?;

    let cookie = Cookie::build((CREDENTIAL_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build();

    tracing::info!("Issued credential");

    Ok((jar.add(cookie), StatusCode::OK))
}
