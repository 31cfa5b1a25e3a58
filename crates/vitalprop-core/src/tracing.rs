//! Logging setup for the vitalprop binaries.
//!
//! Logs always go to stderr so that stdout can carry exported payloads. The
//! `RUST_LOG` environment variable overrides the level picked here.
//!
//! ```ignore
//! use vitalprop_core::tracing::{init_tracing, LogFormat, TracingConfig};
//!
//! init_tracing(TracingConfig::cli().with_format(LogFormat::Json))?;
//! ```

use std::fmt as std_fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events are shown at the configured level.
const LOG_TARGETS: [&str; 3] = ["vitalprop_core", "vitalprop_booking", "vitalprop_client"];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One short human-readable line per event.
    #[default]
    #[serde(alias = "text")]
    Compact,
    /// One JSON object per event, for runs whose stderr is collected.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}` (expected compact or json)")),
        }
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: Level,
    /// Output format
    pub format: LogFormat,
    /// Include the module path, file and line of each event
    pub show_source: bool,
}

impl TracingConfig {
    /// Warnings only, without source locations
    #[must_use]
    pub fn cli() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            show_source: false,
        }
    }

    /// Everything down to debug, with source locations
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Compact,
            show_source: true,
        }
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset, e.g.
    /// `vitalprop_core=warn,vitalprop_booking=warn,vitalprop_client=warn`.
    pub fn default_directive(&self) -> String {
        let level = self.level.to_string().to_ascii_lowercase();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialize tracing with the given configuration.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set or if
/// the default directive does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.default_directive())?,
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.show_source)
        .with_line_number(config.show_source)
        .with_target(config.show_source);

    let layer = match config.format {
        LogFormat::Compact => layer.compact().without_time().boxed(),
        LogFormat::Json => layer.json().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_presets() {
        let quiet = TracingConfig::cli();
        assert_eq!(quiet.level, Level::WARN);
        assert_eq!(quiet.format, LogFormat::Compact);
        assert!(!quiet.show_source);

        let debug = TracingConfig::cli_debug().with_format(LogFormat::Json);
        assert_eq!(debug.level, Level::DEBUG);
        assert_eq!(debug.format, LogFormat::Json);
        assert!(debug.show_source);
    }

    #[test]
    fn default_directive_covers_every_crate() {
        assert_eq!(
            TracingConfig::cli().default_directive(),
            "vitalprop_core=warn,vitalprop_booking=warn,vitalprop_client=warn"
        );
        assert!(EnvFilter::try_new(TracingConfig::cli_debug().default_directive()).is_ok());
    }

    #[test]
    fn parses_log_formats() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("pretty".parse::<LogFormat>().unwrap_err().contains("pretty"));
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
