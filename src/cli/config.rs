//! Configuration file (`paramguard.json`)
//!
//! ```json
//! { "schema_dir": "./schemas", "log_level": "info", "max_depth": 64 }
//! ```
//!
//! Every field is optional. A relative `schema_dir` is resolved against the
//! directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::{Logger, Severity};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<name>.json` schema files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Lowest severity written to the log
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deepest schema nesting accepted by `check`; 0 means unlimited
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_schema_dir() -> String {
    "./schemas".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_depth() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            log_level: default_log_level(),
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    /// Write this configuration as pretty JSON. Never overwrites.
    pub fn write_new(&self, path: &Path) -> CliResult<()> {
        if path.exists() {
            return Err(CliError::already_initialized(path.display()));
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            CliError::config_error(format!("Failed to write config {}: {}", path.display(), e))
        })
    }

    /// Configured log threshold
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::from_name(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error.",
                self.log_level
            ))
        })
    }

    /// Logger honouring the configured threshold
    pub fn logger(&self) -> Logger {
        Logger::new(self.severity().unwrap_or(Severity::Info))
    }

    /// Nesting limit for the validator, `None` when disabled
    pub fn depth_limit(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }

    /// Schema directory, resolved against the config file's directory
    pub fn schema_path(&self, config_path: &Path) -> PathBuf {
        let dir = Path::new(&self.schema_dir);
        if dir.is_absolute() {
            return dir.to_path_buf();
        }
        match config_path.parent() {
            Some(parent) => parent.join(dir),
            None => dir.to_path_buf(),
        }
    }
}
