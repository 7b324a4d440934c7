//! HTTP header name constants.
//!
//! This module defines the header sets the checks inspect: recommended
//! security headers, information-leaking headers, and the WAF/CDN
//! provider fingerprint table.

// Security header names
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "content-security-policy";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "referrer-policy";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";

/// Security headers the headers check expects on every response.
/// All present is `ok`, a subset is `warning`, none is `error`.
pub const RECOMMENDED_SECURITY_HEADERS: &[&str] = &[
    HEADER_CONTENT_SECURITY_POLICY,
    HEADER_X_FRAME_OPTIONS,
    HEADER_X_CONTENT_TYPE_OPTIONS,
    HEADER_REFERRER_POLICY,
    HEADER_STRICT_TRANSPORT_SECURITY,
];

// Server identification
/// Server header (identifies server software)
pub const HEADER_SERVER: &str = "server";
/// X-Powered-By header (identifies server framework)
pub const HEADER_X_POWERED_BY: &str = "x-powered-by";

/// Headers that leak version or runtime details about the server.
pub const INFO_LEAK_HEADERS: &[&str] = &["x-aspnet-version", "x-runtime", "x-version"];

/// WAF/CDN fingerprint table: response header name to provider.
pub const WAF_HEADER_PROVIDERS: &[(&str, &str)] = &[
    ("cf-ray", "Cloudflare"),
    ("x-sucuri-id", "Sucuri"),
    ("x-sucuri-cache", "Sucuri"),
    ("x-fastly-request-id", "Fastly"),
    ("x-akamai-request-id", "Akamai"),
    ("x-akamai-transformed", "Akamai"),
    ("x-aws-cf-id", "AWS CloudFront"),
    ("x-amz-cf-id", "AWS CloudFront"),
    ("x-amz-cf-pop", "AWS CloudFront"),
];

/// `Server` header value substrings that identify a provider on their own.
pub const WAF_SERVER_SUBSTRINGS: &[(&str, &str)] = &[
    ("cloudflare", "Cloudflare"),
    ("cloudfront", "AWS CloudFront"),
];
