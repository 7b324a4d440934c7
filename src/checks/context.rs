//! Shared immutable context handed to every probe.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::dns::DnsClient;

/// Immutable input shared by every probe in one inspection run.
///
/// Constructed once per run and cloned into each spawned probe task;
/// all shared handles are `Arc`s so cloning is cheap.
#[derive(Clone)]
pub struct CheckContext {
    /// Target URL, absolute with scheme
    pub url: Url,
    /// Bare hostname, no scheme or port
    pub hostname: String,
    /// Per-probe timeout budget
    pub timeout: Duration,
    /// HTTP client that follows redirects
    pub client: Arc<reqwest::Client>,
    /// HTTP client with redirects disabled, for manual chain walking
    pub redirect_client: Arc<reqwest::Client>,
    /// Cached DNS client
    pub dns: Arc<DnsClient>,
}

impl CheckContext {
    /// Creates the context for one inspection run.
    pub fn new(
        url: Url,
        hostname: String,
        timeout: Duration,
        client: Arc<reqwest::Client>,
        redirect_client: Arc<reqwest::Client>,
        dns: Arc<DnsClient>,
    ) -> Self {
        CheckContext {
            url,
            hostname,
            timeout,
            client,
            redirect_client,
            dns,
        }
    }

    /// Returns the target's origin, e.g. `https://example.com`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Returns the full target URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}
