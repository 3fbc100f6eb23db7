//! # Configuration Management for the Valkey store
//!
//! This crate provides the configuration structures for the Valkey
//! connection and for the store defaults.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, StoreConfig, ValkeyConfig};
//!
//! let config = AppConfig {
//!     valkey: ValkeyConfig::new("redis://localhost:6379".to_string(), 3000),
//!     store: StoreConfig::new(3600, vec!["default".to_string()]),
//! };
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [valkey]
//! url = "redis://localhost:6379"
//! connection_timeout_ms = 3000
//!
//! [store]
//! default_expiration_seconds = 3600
//! default_tags = []
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from valkey_store.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./valkey_store.toml";
const CONFIG_PATH_ENV: &str = "VALKEY_STORE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub valkey: ValkeyConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Valkey connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValkeyConfig {
    /// Connection string (redis://localhost:6379)
    pub url: String,
    /// Upper bound for establishing the connection, in milliseconds
    pub connection_timeout_ms: u64,
}

/// Defaults applied to every write through the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Default TTL for entries in seconds, 0 disables expiration
    #[serde(default)]
    pub default_expiration_seconds: u64,
    /// Tags attached to entries written without explicit tags
    #[serde(default)]
    pub default_tags: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment (or
    /// `.env`), falling back to the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} (environment or .env file) or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.valkey.url.is_empty() {
            return Err(ConfigError::Invalid(
                "Valkey URL cannot be empty".to_string(),
            ));
        }
        if !self.valkey.url.starts_with("redis://")
            && !self.valkey.url.starts_with("rediss://")
            && !self.valkey.url.starts_with("valkey://")
            && !self.valkey.url.starts_with("valkeys://")
            && !self.valkey.url.starts_with("redis+unix://")
            && !self.valkey.url.starts_with("unix://")
        {
            return Err(ConfigError::Invalid(format!(
                "Unsupported Valkey URL scheme: {}",
                self.valkey.url
            )));
        }
        if self.valkey.connection_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "Valkey connection_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.store.default_tags.iter().any(|tag| tag.is_empty()) {
            return Err(ConfigError::Invalid(
                "Store default_tags cannot contain empty tags".to_string(),
            ));
        }

        Ok(())
    }
}

impl ValkeyConfig {
    /// Create a new Valkey configuration
    pub fn new(url: String, connection_timeout_ms: u64) -> Self {
        Self {
            url,
            connection_timeout_ms,
        }
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }
}

impl Default for ValkeyConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connection_timeout_ms: 3000,
        }
    }
}

impl StoreConfig {
    /// Create a new store configuration
    pub fn new(default_expiration_seconds: u64, default_tags: Vec<String>) -> Self {
        Self {
            default_expiration_seconds,
            default_tags,
        }
    }

    /// Default expiration, `None` when entries should not expire
    pub fn default_expiration(&self) -> Option<Duration> {
        match self.default_expiration_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
