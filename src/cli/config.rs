//! Configuration file
//!
//! A single JSON object. Every field has a default, so the file itself is
//! optional; CLI flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::climate::{StationSelector, StoreOptions};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;

use super::args::ConfigArgs;
use super::errors::{CliError, CliResult};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default "Resources/hawaii.sqlite")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Pool size (default 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection (default 30)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Station reported by `/tobs`; looked up from the data when unset
    #[serde(default)]
    pub most_active_station: Option<String>,

    /// Log line rendering (default "compact")
    #[serde(default)]
    pub log_format: LogFormat,

    /// HTTP bind and CORS settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("Resources/hawaii.sqlite")
}
fn default_max_connections() -> u32 {
    5
}
fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            most_active_station: None,
            log_format: LogFormat::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the file named by `--config` (or defaults) and apply overrides
    pub fn resolve(args: &ConfigArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(database) = &args.database {
            config.database_path = database.clone();
        }

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        if self.acquire_timeout_secs == 0 {
            return Err(CliError::config_error("acquire_timeout_secs must be > 0"));
        }

        if let Some(station) = &self.most_active_station {
            if station.trim().is_empty() {
                return Err(CliError::config_error(
                    "most_active_station must not be empty when set",
                ));
            }
        }

        Ok(())
    }

    /// Pool settings for the climate store
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            database_path: self.database_path.clone(),
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    /// How `/tobs` picks its station
    pub fn station_selector(&self) -> StationSelector {
        StationSelector::from_config(self.most_active_station.as_deref())
    }
}
