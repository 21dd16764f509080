use super::Connector;
use crate::config::MongoSettings;
use crate::error::AppError;
use async_trait::async_trait;
use mongodb::{
    Client as MongoClient, Collection, Database,
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

/// An open MongoDB client bound to one database.
#[derive(Clone, Debug)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds a client pinned to Stable API v1 and verifies it with a ping.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, AppError> {
        tracing::info!(database = %settings.database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&settings.uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;

        let db = client.database(&settings.database);
        let mongo = Self { client, db };
        tracing::info!(database = %settings.database, "Successfully connected to MongoDB database");

        Ok(mongo)
    }

    /// Liveness probe against the bound database.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Production [`Connector`] backed by the MongoDB driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoConnector;

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoDb;

    async fn connect(&self, settings: &MongoSettings) -> Result<MongoDb, AppError> {
        MongoDb::connect(settings).await
    }

    async fn close(&self, handle: MongoDb) {
        handle.client.shutdown().await;
    }
}
