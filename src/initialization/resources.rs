//! Shared resources handed to every inspection run.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::DnsClient;
use crate::error_handling::InitializationError;
use crate::initialization::{init_client, init_redirect_client, init_resolver};
use crate::rate_limit::RateLimiter;

/// All long-lived handles an inspection run borrows.
///
/// Built once per process and shared across runs; the DNS cache and the
/// rate-limit counters inside live for the lifetime of this struct.
pub struct Resources {
    /// HTTP client for making requests (with redirects enabled)
    pub client: Arc<reqwest::Client>,
    /// HTTP client for redirect resolution (with redirects disabled)
    pub redirect_client: Arc<reqwest::Client>,
    /// Cached DNS client for hostname lookups
    pub dns: Arc<DnsClient>,
    /// Per-caller rate limiter gating run initiation
    pub rate_limiter: Arc<RateLimiter>,
}

/// Initializes all shared resources from the tool configuration.
///
/// # Errors
///
/// Returns `InitializationError` if HTTP client creation fails.
pub fn init_resources(config: &Config) -> Result<Resources, InitializationError> {
    let client = init_client(config)?;
    let redirect_client = init_redirect_client(config)?;
    let dns = Arc::new(DnsClient::new(init_resolver()));
    let rate_limiter = Arc::new(RateLimiter::default());

    Ok(Resources {
        client,
        redirect_client,
        dns,
        rate_limiter,
    })
}
