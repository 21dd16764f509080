//! Lazily opened, explicitly released database connection.
//!
//! [`ConnectionManager`] owns at most one live handle. The first successful
//! [`ConnectionManager::acquire`] opens it, later calls hand out clones of the
//! same handle, and [`ConnectionManager::release`] closes it so that the next
//! acquire reconnects. Opening the connection is delegated to a [`Connector`].

mod mongo;

pub use mongo::{MongoConnector, MongoDb};

use crate::config::{MongoEnvKeys, MongoSettings};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Opens and closes the underlying connection on behalf of a [`ConnectionManager`].
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self, settings: &MongoSettings) -> Result<Self::Handle, AppError>;

    async fn close(&self, handle: Self::Handle);
}

/// Produces the settings used by each acquire.
pub type SettingsSource = Arc<dyn Fn() -> Result<MongoSettings, AppError> + Send + Sync>;

pub type MongoConnectionManager = ConnectionManager<MongoConnector>;

pub struct ConnectionManager<C: Connector> {
    connector: C,
    settings: SettingsSource,
    // Held across the connect await so concurrent first callers share one connection.
    handle: Mutex<Option<C::Handle>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, settings: SettingsSource) -> Self {
        Self {
            connector,
            settings,
            handle: Mutex::new(None),
        }
    }

    /// Manager whose settings are read from the environment on every acquire.
    pub fn from_env(connector: C, keys: MongoEnvKeys) -> Self {
        Self::new(connector, Arc::new(move || MongoSettings::from_env(keys)))
    }

    /// Returns the shared handle, connecting first if nothing is open.
    ///
    /// Settings are resolved before any network activity, so missing
    /// configuration fails with [`AppError::ConfigError`] even when a handle
    /// is already open. Connection failures are returned unchanged and leave
    /// the manager empty.
    pub async fn acquire(&self) -> Result<C::Handle, AppError> {
        let settings = (self.settings)()?;

        let mut slot = self.handle.lock().await;
        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        let handle = self.connector.connect(&settings).await?;
        *slot = Some(handle.clone());
        Ok(handle)
    }

    /// Closes the open handle, if any. Calling it again is a no-op.
    pub async fn release(&self) {
        let handle = self.handle.lock().await.take();
        match handle {
            Some(handle) => {
                self.connector.close(handle).await;
                tracing::info!("Database connection closed");
            }
            None => tracing::debug!("No open database connection to release"),
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}
