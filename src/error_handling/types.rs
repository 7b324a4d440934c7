//! Error type definitions.
//!
//! Failures inside a check never surface as errors; they are absorbed into
//! the check's own result. The types here cover everything outside that
//! boundary: setup failures and the pre-run rejections callers see.

use chrono::{DateTime, Utc};
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejections raised before any check runs.
///
/// Once the check batch is dispatched there are no run-level failures; a
/// hostile or broken target degrades individual results, never the run.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The supplied URL could not be normalized into an http(s) target.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The caller exhausted its rate-limit window.
    #[error("Rate limit exceeded. Try again after {reset_at}")]
    RateLimited {
        /// When the caller's window resets
        reset_at: DateTime<Utc>,
    },
}
