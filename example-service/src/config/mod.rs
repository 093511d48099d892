use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::time::Duration;

/// Service settings, read from `.env`, an optional `configuration` file and
/// the process environment (`PORT`, `MONGO_URI`, `MONGO_DB_NAME`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_mongo_uri")]
    pub mongo_uri: String,
    #[serde(default = "default_mongo_db_name")]
    pub mongo_db_name: String,
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_db_name() -> String {
    "go_microservice".to_string()
}

fn default_store_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            mongo_uri: default_mongo_uri(),
            mongo_db_name: default_mongo_db_name(),
            store_timeout_secs: default_store_timeout_secs(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl ExampleConfig {
    pub fn load() -> Result<Self, AppError> {
        let config: Self = core_config::load_settings()?;
        if config.store_timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "STORE_TIMEOUT_SECS must be greater than 0"
            )));
        }
        Ok(config)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
