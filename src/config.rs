use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::Validate;

const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Application configuration, loaded from layered files plus `APP_`
/// environment overrides.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Connection URL for Postgres or SQLite.
    #[validate(length(min = 1, message = "database_url is required"))]
    pub database_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, max = 512))]
    pub db_max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub db_min_connections: u32,

    /// Event channel capacity before senders block.
    #[serde(default = "default_event_capacity")]
    pub event_channel_capacity: usize,
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}
fn default_event_capacity() -> usize {
    256
}

impl AppConfig {
    /// Loads `config/default.toml`, then `config/{APP_ENV}.toml`, then
    /// `APP_`-prefixed environment variables, later layers winning.
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

        let mut builder = Config::builder()
            .set_default("environment", environment.clone())?;

        let default_path = Path::new(CONFIG_DIR).join("default.toml");
        if default_path.exists() {
            builder = builder.add_source(File::from(default_path));
        }

        let env_path = Path::new(CONFIG_DIR).join(format!("{environment}.toml"));
        if env_path.exists() {
            builder = builder.add_source(File::from(env_path));
        }

        builder = builder.add_source(Environment::with_prefix("APP").separator("__"));

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        info!(
            environment = %config.environment,
            host = %config.host,
            port = config.port,
            "configuration loaded"
        );

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        AppConfig {
            environment: default_environment(),
            host: default_host(),
            port: default_port(),
            database_url: "sqlite::memory:".to_string(),
            log_level: default_log_level(),
            db_max_connections: default_max_connections(),
            db_min_connections: default_min_connections(),
            event_channel_capacity: default_event_capacity(),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn empty_database_url_fails_validation() {
        let mut config = base();
        config.database_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        assert_eq!(base().bind_address(), "127.0.0.1:8080");
    }
}
