use service_core::database::{ConnectionManager, MongoConnector};
use service_core::observability::{init_tracing, shutdown_tracing};
use std::sync::Arc;
use users_service::config::{UsersConfig, SERVICE_NAME};
use users_service::services::init_metrics;
use users_service::startup::{shutdown_signal, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = UsersConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics()?;

    let db = Arc::new(ConnectionManager::from_env(
        MongoConnector,
        config.mongo_keys,
    ));

    // Refuse to start unless the database answers a ping.
    let app = Application::build(config, db).await.map_err(|e| {
        tracing::error!("Database error: {}", e);
        anyhow::anyhow!("Startup failed: {}", e)
    })?;

    tracing::info!("Start the app: http://localhost:{}", app.port());

    app.run_until_stopped(shutdown_signal()).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    shutdown_tracing();
    Ok(())
}
