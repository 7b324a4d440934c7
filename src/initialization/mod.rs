//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - HTTP clients (one following redirects, one observing them)
//! - DNS resolver
//! - Logger
//! - The resource bundle handed to inspection runs

mod client;
mod logger;
mod resolver;
mod resources;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;
pub use resolver::init_resolver;
pub use resources::{init_resources, Resources};

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. This must be called before
/// any TLS connections are established. Uses the default provider which supports
/// all standard TLS features.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
