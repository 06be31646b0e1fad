//! Application startup and lifecycle management.

use crate::config::ChatConfig;
use crate::handlers::{auth::init_handler, chat::chat_handler, health::health_check};
use crate::middleware::auth_middleware;
use crate::services::providers::openai::{OpenAiProvider, OpenAiSettings};
use crate::services::providers::CompletionProvider;
use crate::services::{ChatRelay, TokenService};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::Response,
    routing::{any, get, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, request_id_middleware};
use service_core::response::error_json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ChatConfig>,
    pub tokens: Arc<TokenService>,
    pub relay: Arc<ChatRelay>,
}

impl AppState {
    pub fn new(config: ChatConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        let tokens = TokenService::new(config.auth.jwt_secret.clone());
        if !tokens.is_configured() {
            tracing::warn!("JWT_SECRET is not set; credential issuance will fail");
        }

        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            relay: Arc::new(ChatRelay::new(provider)),
        }
    }
}

async fn not_found() -> Response {
    error_json(StatusCode::NOT_FOUND, "Not found")
}

pub fn build_router(state: AppState) -> Router {
    // Permissive CORS on every relay response, failures included.
    let mut chat_route: MethodRouter<AppState> = any(chat_handler).layer(
        ServiceBuilder::new()
            .layer(DefaultBodyLimit::disable())
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            )),
    );

    if state.config.auth.required {
        chat_route = chat_route.layer(from_fn_with_state(state.clone(), auth_middleware));
    } else {
        tracing::warn!("Credential gate disabled; /api/chat is public");
    }

    Router::new()
        .route("/health", get(health_check))
        .route("/api/init", get(init_handler).post(init_handler))
        .route("/api/chat", chat_route)
        .fallback(not_found)
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the configured OpenAI endpoint.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let provider = OpenAiProvider::new(OpenAiSettings {
            api_key: config.openai.api_key.clone(),
            base_url: config.openai.base_url.clone(),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            base_url = %config.openai.base_url,
            "Initialized OpenAI provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application with an explicit provider (port 0 = random port).
    pub async fn build_with_provider(
        config: ChatConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        let port = listener
            .local_addr()
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?
            .port();

        let state = AppState::new(config, provider);
        tracing::info!(
            model = %state.relay.model(),
            auth_required = state.config.auth.required,
            "Chat service listening on port {}",
            port
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
