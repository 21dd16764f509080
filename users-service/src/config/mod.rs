use service_core::config::{self as core_config, MongoEnvKeys};
use service_core::error::AppError;

pub const SERVICE_NAME: &str = "users-service";

#[derive(Debug, Clone)]
pub struct UsersConfig {
    pub common: core_config::Config,
    /// Variables read by the connection manager on every acquire.
    pub mongo_keys: MongoEnvKeys,
}

impl UsersConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, the optional configuration file and PORT/LOG_LEVEL.
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            mongo_keys: MongoEnvKeys::SERVICE,
        })
    }
}
