//! Shared utilities.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - Wall-clock measurement helpers

mod selector;
mod timing;

pub use selector::parse_selector_with_fallback;
pub use timing::{duration_ms, elapsed_ms};
