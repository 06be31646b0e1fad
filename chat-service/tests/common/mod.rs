//! Test helpers for chat-service integration tests.
//!
//! Everything runs in-process against the router with a mock provider.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chat_service::config::{AuthConfig, ChatConfig, OpenAiConfig};
use chat_service::services::providers::mock::{MockCompletionProvider, MockReply};
use chat_service::{build_router, AppState};
use http_body_util::BodyExt;
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-jwt-secret";

pub fn test_config(auth_required: bool) -> ChatConfig {
    ChatConfig {
        common: Config {
            port: 0,
            log_level: "error".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: Secret::new(TEST_SECRET.to_string()),
            required: auth_required,
        },
        openai: OpenAiConfig {
            api_key: Secret::new("sk-test".to_string()),
            base_url: "http://127.0.0.1:9/v1".to_string(),
        },
    }
}

pub fn app_with_config(config: ChatConfig, reply: MockReply) -> Router {
    let provider = Arc::new(MockCompletionProvider::new(reply));
    build_router(AppState::new(config, provider))
}

/// Router with the credential gate switched off.
pub fn open_app(reply: MockReply) -> Router {
    app_with_config(test_config(false), reply)
}

/// Router with the credential gate in front of `/api/chat`.
pub fn gated_app(reply: MockReply) -> Router {
    app_with_config(test_config(true), reply)
}

pub fn chat_request(method: Method, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body is not JSON")
}

pub fn assert_json_content_type(response: &Response<Body>) {
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

/// Call `/api/init` and return the `name=value` pair to send back as a Cookie.
pub async fn issue_cookie(app: &Router) -> String {
    let response = send(
        app,
        Request::builder()
            .uri("/api/init")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("init did not set a cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().trim().to_string()
}
