//! site_inspector library: read-only website inspection and grading
//!
//! This library runs a battery of independent, read-only checks against a
//! single URL — security headers, HTTPS and certificate details, DNS
//! records and mail security, redirects, robots/sitemap, internal links,
//! metadata, technology stack, performance — and aggregates the results
//! into a weighted 0-100 score with a letter grade.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use site_inspector::initialization::{init_crypto_provider, init_resources};
//! use site_inspector::{inspect_site, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "example.com".into(),
//!     ..Config::default()
//! };
//!
//! init_crypto_provider();
//! let resources = init_resources(&config)?;
//! let report = inspect_site(
//!     &resources,
//!     &config.url,
//!     "docs",
//!     Duration::from_millis(config.timeout_ms),
//! )
//! .await?;
//!
//! println!(
//!     "{} scored {}/100 (grade {})",
//!     report.url, report.score.score, report.score.grade
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod checks;
pub mod config;
pub mod dns;
mod error_handling;
pub mod export;
pub mod initialization;
mod ip_intel;
mod recommendations;
pub mod rate_limit;
pub mod scoring;
mod tls;
mod utils;

// Re-export public API
pub use app::{inspect_site, validate_and_normalize_url};
pub use checks::{
    CheckCategory, CheckResult, CheckStatus, ChecksResponse, GlobalScore, Grade,
};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, InspectError};
pub use initialization::{init_resources, Resources};
