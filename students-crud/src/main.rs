use service_core::config::{Config, MongoEnvKeys};
use service_core::database::{ConnectionManager, MongoConnector};
use service_core::observability::{init_tracing, shutdown_tracing};
use students_crud::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;
    init_tracing(
        "students-crud",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    let manager = ConnectionManager::from_env(MongoConnector, MongoEnvKeys::SCRIPT);

    let outcome = match manager.acquire().await {
        Ok(db) => {
            tracing::info!("Connected to the database");
            run(&db).await
        }
        Err(e) => Err(e),
    };

    // Close the connection whether or not the run succeeded.
    manager.release().await;
    shutdown_tracing();

    match outcome {
        Ok(report) => {
            tracing::info!(report = ?report, "CRUD run finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!("CRUD run failed: {}", e);
            Err(anyhow::anyhow!("CRUD run failed: {}", e))
        }
    }
}
