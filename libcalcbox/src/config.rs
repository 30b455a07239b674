//! Configuration management for Calcbox
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! The engine's numeric contract (precision, display length) is fixed and
//! deliberately not part of the configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::logging::LogFormat;
use crate::service::history::HISTORY_CAPACITY;

/// Default lifetime of a transient error message
pub const ERROR_DISPLAY_MS: u64 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub display: DisplayConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub error_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: HISTORY_CAPACITY,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            error_timeout_ms: ERROR_DISPLAY_MS,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "warn".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "history.capacity must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Resolve the configuration file path (`CALCBOX_CONFIG`, else the XDG config dir)
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CALCBOX_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("calcbox").join("config.toml"))
}
