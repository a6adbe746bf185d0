//! Configuration file
//!
//! A single JSON object. Every field has a default, so `{}` is a valid
//! config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::http_server::HttpServerConfig;
use crate::importer::ImportConfig;
use crate::observability::parse_level;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default "./data/orgstat.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Log level when `RUST_LOG` is unset (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pending API call records held before new ones are dropped
    #[serde(default = "default_call_log_capacity")]
    pub call_log_capacity: usize,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub import: ImportConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./data/orgstat.db")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_call_log_capacity() -> usize {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            call_log_capacity: default_call_log_capacity(),
            http: HttpServerConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if parse_level(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, debug, info, warn or error.",
                self.log_level
            )));
        }

        if self.call_log_capacity == 0 {
            return Err(CliError::config_error("call_log_capacity must be > 0"));
        }

        self.http.validate().map_err(CliError::config_error)?;

        Ok(())
    }

    /// Configured log level
    pub fn level(&self) -> Level {
        parse_level(&self.log_level).unwrap_or(Level::INFO)
    }
}
