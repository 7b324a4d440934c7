//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_LOOKUP_TIMEOUT_MS};

/// Initializes the DNS resolver used by all DNS-backed checks.
///
/// Uses the default resolver configuration with tight timeouts so a slow or
/// unresponsive DNS server degrades a single check instead of stalling the
/// run. `ndots` is set to 0 to prevent search-domain appending.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_millis(DNS_LOOKUP_TIMEOUT_MS);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
