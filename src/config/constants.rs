use std::time::Duration;

// Network operation timeouts
/// Default per-check timeout budget in milliseconds.
/// Every check bounds its own network calls by this budget; a check that
/// blows the budget reports an error result instead of hanging the run.
pub const CHECK_TIMEOUT_MS: u64 = 8_000;
/// Per-query DNS timeout in milliseconds
pub const DNS_LOOKUP_TIMEOUT_MS: u64 = 1_500;
/// DNS retry attempts per query
pub const DNS_ATTEMPTS: usize = 2;
/// TCP connect timeout for the direct TLS handshake, in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

// Caching
/// How long resolved DNS answers stay valid in the in-memory cache
pub const DNS_CACHE_TTL: Duration = Duration::from_secs(60);

// Redirect chain walking
/// Maximum redirect hops followed before giving up
pub const MAX_REDIRECT_HOPS: usize = 10;
/// Hop count above which the redirect chain is flagged as excessive
pub const REDIRECT_WARNING_THRESHOLD: usize = 5;

// Link sampling
/// How many discovered links are probed for reachability
pub const LINK_SAMPLE_SIZE: usize = 10;
/// Per-link HEAD timeout in milliseconds, independent of the check budget
pub const LINK_CHECK_TIMEOUT_MS: u64 = 3_000;
/// How many unreachable links are echoed back in the result payload
pub const UNREACHABLE_SAMPLE_LIMIT: usize = 5;

// Performance thresholds
/// Response time above which the performance check degrades to warning (ms)
pub const RESPONSE_TIME_WARNING_MS: u64 = 1_000;
/// Response time above which the performance check reports an error (ms)
pub const RESPONSE_TIME_ERROR_MS: u64 = 2_000;
/// Response time above which the slow-response recommendation escalates to critical (ms)
pub const RESPONSE_TIME_CRITICAL_MS: u64 = 1_500;
/// Uncompressed body size above which missing compression is flagged (bytes)
pub const COMPRESSION_SIZE_THRESHOLD: u64 = 10_000;

// Rate limiting
/// Fixed rate-limit window length
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_millis(30_000);
/// Runs allowed per caller per window
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 1;

// Content limits
/// robots.txt content is truncated to this many characters in the payload
pub const ROBOTS_CONTENT_PREVIEW_CHARS: usize = 500;

/// DKIM selector subdomains probed in order; the first selector with a
/// `v=DKIM1` TXT record wins.
pub const DKIM_SELECTORS: &[&str] = &["default", "google", "selector1", "selector2"];

/// Default User-Agent string for HTTP requests.
///
/// A generic Chrome-like string so targets serve the same content they would
/// serve a browser. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
