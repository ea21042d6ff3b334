use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

use crate::logging::{LogFormat, LoggingConfig};

pub const MIGRATIONS_PATH_VAR: &str = "STEPWISE_MIGRATIONS_PATH";
pub const LOG_LEVEL_VAR: &str = "STEPWISE_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "STEPWISE_LOG_FORMAT";
pub const LOG_FILTER_VAR: &str = "STEPWISE_LOG_FILTER";

/// Configuration loaded from environment variables
pub trait EnvConfig: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Where each field came from, for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(String),
    Nested,
}

/// Settings for binding a migration source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the migration files, relative to the filesystem root
    pub migrations_path: String,
    pub logging: LoggingConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            migrations_path: "migrations".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_migrations_path<S: Into<String>>(mut self, path: S) -> Self {
        self.migrations_path = path.into();
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

impl EnvConfig for SourceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let migrations_path = get_env_or_default(MIGRATIONS_PATH_VAR, "migrations");
        let logging = LoggingConfig::from_env()?;

        Ok(SourceConfig {
            migrations_path,
            logging,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.migrations_path.contains('\0') {
            return Err(ConfigError::ValidationFailed {
                field: "migrations_path".to_string(),
                reason: "Path cannot contain NUL bytes".to_string(),
            });
        }

        self.logging.validate()
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "migrations_path".to_string(),
            ConfigSource::EnvVar(MIGRATIONS_PATH_VAR.to_string()),
        );
        sources.insert("logging".to_string(), ConfigSource::Nested);
        sources
    }
}

impl EnvConfig for LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let level = get_env_or_default(LOG_LEVEL_VAR, "info");
        let format = get_env_or_default(LOG_FORMAT_VAR, "compact").parse::<LogFormat>()?;
        let env_filter = get_env_optional(LOG_FILTER_VAR);

        Ok(LoggingConfig {
            level,
            format,
            env_filter,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        LoggingConfig::validate(self)
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "level".to_string(),
            ConfigSource::EnvVar(LOG_LEVEL_VAR.to_string()),
        );
        sources.insert(
            "format".to_string(),
            ConfigSource::EnvVar(LOG_FORMAT_VAR.to_string()),
        );
        sources.insert(
            "env_filter".to_string(),
            ConfigSource::EnvVar(LOG_FILTER_VAR.to_string()),
        );
        sources
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}
