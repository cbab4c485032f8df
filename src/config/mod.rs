//! Configuration loading and management
//!
//! Configuration comes from a YAML file, then environment variables override
//! individual values. Every section is optional.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 4000
//! storage:
//!   backend: in_memory
//!   seed_file: seed.yaml
//! errors:
//!   mapping: strict
//! logging:
//!   filter: info,hotels=debug
//! ```

use crate::core::error::ErrorMapping;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// File read when `HOTELS_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "hotels.yaml";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_cors() -> bool {
    true
}

/// Which repository implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_memory" => Ok(StorageBackend::InMemory),
            "postgres" => Ok(StorageBackend::Postgres),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Connection URL, required for `postgres`
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// YAML seed document loaded at startup
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: None,
            max_connections: default_max_connections(),
            seed_file: None,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorsConfig {
    #[serde(default)]
    pub mapping: ErrorMapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub errors: ErrorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `HOTELS_CONFIG` (or `hotels.yaml` when present), then
    /// apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("HOTELS_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override values from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Override values from `lookup`
    ///
    /// Recognized variables: `HOTELS_HOST`, `HOTELS_PORT`,
    /// `HOTELS_STORAGE_BACKEND`, `DATABASE_URL`, `HOTELS_ERROR_MAPPING`.
    /// `DATABASE_URL` only sets the connection URL; the backend changes
    /// through `storage.backend` or `HOTELS_STORAGE_BACKEND`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("HOTELS_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("HOTELS_PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Env {
                var: "HOTELS_PORT",
                message: format!("'{}' is not a port: {}", port, e),
            })?;
        }

        if let Some(backend) = lookup("HOTELS_STORAGE_BACKEND") {
            self.storage.backend = backend.parse().map_err(|message| ConfigError::Env {
                var: "HOTELS_STORAGE_BACKEND",
                message,
            })?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.url = Some(url);
        }

        if let Some(mapping) = lookup("HOTELS_ERROR_MAPPING") {
            self.errors.mapping = mapping.parse().map_err(|message| ConfigError::Env {
                var: "HOTELS_ERROR_MAPPING",
                message,
            })?;
        }

        Ok(())
    }

    /// Address to bind, as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
