//! Logging setup for Calcbox front ends
//!
//! The library only emits `tracing` events. Binaries pick a subscriber here,
//! driven by the `[logging]` config section with environment overrides:
//!
//! - `CALCBOX_LOG_FORMAT` replaces `logging.format` (`text`, `json`, `pretty`)
//! - `CALCBOX_LOG_LEVEL` replaces `logging.level`
//! - `RUST_LOG`, when set, wins over both levels
//!
//! All output goes to stderr so stdout stays free for the display.
//!
//! ```no_run
//! use libcalcbox::config::LogConfig;
//! use libcalcbox::logging::LoggingConfig;
//!
//! LoggingConfig::from_config(&LogConfig::default(), false).init();
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

const FORMAT_ENV: &str = "CALCBOX_LOG_FORMAT";
const LEVEL_ENV: &str = "CALCBOX_LOG_LEVEL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain lines without colors
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// Multi-line colored output for development
    Pretty,
}

impl LogFormat {
    const ALL: [LogFormat; 3] = [LogFormat::Text, LogFormat::Json, LogFormat::Pretty];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid log format: '{}'. Valid options: text, json, pretty",
                    s
                )
            })
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved subscriber settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive, e.g. `warn` or `libcalcbox=debug`
    pub level: String,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>) -> Self {
        Self {
            format,
            level: level.into(),
        }
    }

    /// Build from the `[logging]` section, applying environment overrides
    ///
    /// `verbose` forces the `debug` level regardless of config or environment.
    pub fn from_config(config: &LogConfig, verbose: bool) -> Self {
        let mut resolved = Self::new(config.format, config.level.clone());

        if let Some(format) = std::env::var(FORMAT_ENV).ok().and_then(|s| s.parse().ok()) {
            resolved.format = format;
        }
        if let Ok(level) = std::env::var(LEVEL_ENV) {
            resolved.level = level;
        }
        if verbose {
            resolved.level = "debug".to_string();
        }
        resolved
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber
    ///
    /// A second call is a no-op; the first subscriber stays in place.
    pub fn init(&self) {
        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_current_span(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .try_init(),
        };

        if installed.is_err() {
            tracing::debug!("logging already initialized");
        }
    }
}

/// Initialize logging from defaults and environment only
pub fn init_default() {
    LoggingConfig::from_config(&LogConfig::default(), false).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(FORMAT_ENV);
        std::env::remove_var(LEVEL_ENV);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("Invalid log format: 'xml'"));
    }

    #[test]
    fn test_log_format_display_matches_serde() {
        for format in LogFormat::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format));
        }
    }

    #[test]
    #[serial]
    fn test_from_config_uses_section() {
        clear_env();
        let section = LogConfig {
            format: LogFormat::Pretty,
            level: "trace".to_string(),
        };
        let resolved = LoggingConfig::from_config(&section, false);
        assert_eq!(resolved, LoggingConfig::new(LogFormat::Pretty, "trace"));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_section() {
        clear_env();
        std::env::set_var(FORMAT_ENV, "json");
        std::env::set_var(LEVEL_ENV, "info");

        let resolved = LoggingConfig::from_config(&LogConfig::default(), false);
        clear_env();

        assert_eq!(resolved, LoggingConfig::new(LogFormat::Json, "info"));
    }

    #[test]
    #[serial]
    fn test_unparseable_env_format_is_ignored() {
        clear_env();
        std::env::set_var(FORMAT_ENV, "xml");

        let resolved = LoggingConfig::from_config(&LogConfig::default(), false);
        clear_env();

        assert_eq!(resolved.format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_verbose_forces_debug() {
        clear_env();
        std::env::set_var(LEVEL_ENV, "error");

        let resolved = LoggingConfig::from_config(&LogConfig::default(), true);
        clear_env();

        assert_eq!(resolved.level, "debug");
    }
}
