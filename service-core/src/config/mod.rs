use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use std::env;

/// Process-level settings shared by every binary in the workspace.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC endpoint; trace export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Loads `.env`, then layers an optional `configuration` file and the
    /// environment (`PORT`, `LOG_LEVEL`, `OTLP_ENDPOINT`).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Names of the environment variables that locate the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MongoEnvKeys {
    pub uri: &'static str,
    pub database: &'static str,
    pub default_database: Option<&'static str>,
}

impl MongoEnvKeys {
    /// Keys read by the HTTP service. Both are required.
    pub const SERVICE: Self = Self {
        uri: "DB_CONNECTION_STRING",
        database: "DB_NAME",
        default_database: None,
    };

    /// Keys read by the one-shot CRUD program.
    pub const SCRIPT: Self = Self {
        uri: "MONGO_URI",
        database: "MONGO_DBNAME",
        default_database: Some("test"),
    };
}

/// Where to connect: URI plus target database name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

impl MongoSettings {
    pub fn from_env(keys: MongoEnvKeys) -> Result<Self, AppError> {
        Self::from_lookup(keys, |key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(keys: MongoEnvKeys, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            uri: get_setting(&lookup, keys.uri, None)?,
            database: get_setting(&lookup, keys.database, keys.default_database)?,
        })
    }
}

fn get_setting<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|value| !value.trim().is_empty()) {
        Some(value) => Ok(value),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
