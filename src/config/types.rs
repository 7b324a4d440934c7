//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{CHECK_TIMEOUT_MS, DEFAULT_USER_AGENT};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Tool configuration, parsed from the command line by the binary or built
/// programmatically by library callers.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "site_inspector",
    about = "Runs a battery of read-only website checks and grades the results"
)]
pub struct Config {
    /// URL to inspect (scheme optional; https:// is assumed when missing)
    pub url: String,

    /// Per-check timeout budget in milliseconds
    #[arg(long, default_value_t = CHECK_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the full report as JSON instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Write the JSON report to a file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_ms: CHECK_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            json: false,
            output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
