//! Application-level orchestration.
//!
//! This module ties the outward-facing pieces together: URL validation and
//! the inspection entry point that feeds a validated target into the check
//! battery.

mod inspect;
mod url;

pub use inspect::inspect_site;
pub use url::validate_and_normalize_url;
