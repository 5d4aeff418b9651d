//! Configuration loading and management
//!
//! Configuration is read from YAML. Every section has defaults, so an empty
//! file (or no file at all) yields a working in-memory setup that seeds from
//! the public product transaction feed.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5000
//! seed:
//!   url: https://s3.amazonaws.com/roxiler.com/product_transaction.json
//! storage:
//!   backend: mongodb
//!   uri: mongodb://localhost:27017
//!   database: transactions
//!   collection: products
//! query:
//!   default_month: March
//!   default_limit: 10
//!   max_limit: 100
//! ```

use crate::core::error::ConfigError;
use crate::core::month::Month;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the seed feed
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "TRANSACTIONS_CONFIG";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "transactions.yaml";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub seed: SeedConfig,
    pub storage: StorageConfig,
    pub query: QueryConfig,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Remote seed feed settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub url: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEED_URL.to_string(),
        }
    }
}

/// Which record store backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Record store settings
///
/// `uri`, `database` and `collection` only matter for the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "transactions".to_string(),
            collection: "products".to_string(),
        }
    }
}

/// Listing defaults and bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Month used by the listing when none is given
    pub default_month: Month,

    /// Page size used when none is given
    pub default_limit: u64,

    /// Larger page sizes are clamped to this
    pub max_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_month: Month::March,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve configuration the way the binary does
    ///
    /// Reads the file named by `TRANSACTIONS_CONFIG` (which must exist), else
    /// `transactions.yaml` if present, else defaults. Environment overrides
    /// are applied last and the result is validated.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name
    ///
    /// Recognised: `TRANSACTIONS_HOST`, `TRANSACTIONS_PORT`,
    /// `TRANSACTIONS_SEED_URL`, `MONGODB_URI`, `MONGODB_DATABASE`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TRANSACTIONS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TRANSACTIONS_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }
        if let Some(url) = lookup("TRANSACTIONS_SEED_URL") {
            self.seed.url = url;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            self.storage.uri = uri;
        }
        if let Some(database) = lookup("MONGODB_DATABASE") {
            self.storage.database = database;
        }
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "seed.url".to_string(),
                value: self.seed.url.clone(),
                message: "must not be empty".to_string(),
            });
        }
        if self.query.default_limit < 1 {
            return Err(ConfigError::InvalidValue {
                field: "query.default_limit".to_string(),
                value: self.query.default_limit.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.query.max_limit < self.query.default_limit {
            return Err(ConfigError::InvalidValue {
                field: "query.max_limit".to_string(),
                value: self.query.max_limit.to_string(),
                message: format!(
                    "must be at least default_limit ({})",
                    self.query.default_limit
                ),
            });
        }
        Ok(())
    }
}
