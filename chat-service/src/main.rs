use chat_service::config::ChatConfig;
use chat_service::startup::Application;
use chat_service::SERVICE_NAME;
use dotenvy::dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = ChatConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.common.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(SERVICE_NAME, &log_level);

    let config = config.map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to build application");
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
