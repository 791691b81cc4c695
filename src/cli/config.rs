//! Configuration file
//!
//! Optional JSON file; every field has a default.
//!
//! ```json
//! { "data_file": "./venues.txt", "log_level": "info", "bucket_capacity": 10 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::index::DEFAULT_BUCKET_CAPACITY;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// venuedb configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog loaded at startup (default "./venues.txt")
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Lowest log severity written to stderr (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial capacity of new buckets (default 10)
    #[serde(default = "default_bucket_capacity")]
    pub bucket_capacity: usize,
}

fn default_data_file() -> String {
    "./venues.txt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bucket_capacity() -> usize {
    DEFAULT_BUCKET_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            bucket_capacity: default_bucket_capacity(),
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

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.bucket_capacity == 0 {
            return Err(CliError::config_error("bucket_capacity must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)
    }

    /// Catalog file as a path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_file)
    }
}
