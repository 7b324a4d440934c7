//! Performance-related recommendation builders.

use crate::checks::{Recommendation, ReferenceLink, Severity};
use crate::config::RESPONSE_TIME_CRITICAL_MS;

/// Builds the advisory for a slow server response.
///
/// Escalates to critical when the time to first byte exceeds the
/// critical threshold.
pub(crate) fn slow_response_recommendation(ttfb_ms: u64) -> Recommendation {
    Recommendation {
        id: "slow-response-time".to_string(),
        title: "Slow server response time".to_string(),
        description: format!(
            "The server response time is higher than recommended ({ttfb_ms} ms)."
        ),
        impact: "Slow responses degrade user experience and SEO rankings.".to_string(),
        how_to: vec![
            "Enable server-side caching.".to_string(),
            "Use a CDN to serve static assets.".to_string(),
            "Optimize backend processing and database queries.".to_string(),
            "Consider using a faster hosting provider or upgrading your plan.".to_string(),
        ],
        references: vec![ReferenceLink {
            label: "Web.dev – Time to First Byte".to_string(),
            url: "https://web.dev/ttfb/".to_string(),
        }],
        severity: if ttfb_ms > RESPONSE_TIME_CRITICAL_MS {
            Severity::Critical
        } else {
            Severity::Warning
        },
    }
}

/// Builds the advisory for uncompressed responses.
pub(crate) fn compression_recommendation() -> Recommendation {
    Recommendation {
        id: "no-compression".to_string(),
        title: "Compression not enabled".to_string(),
        description: "The server is not using compression (gzip or brotli) for responses."
            .to_string(),
        impact: "Larger response sizes increase bandwidth usage and slow down page loads."
            .to_string(),
        how_to: vec![
            "Enable gzip or brotli compression on your server.".to_string(),
            "Configure your web server (nginx, Apache, etc.) to compress text-based files."
                .to_string(),
            "Test compression with tools like PageSpeed Insights.".to_string(),
        ],
        references: vec![ReferenceLink {
            label: "MDN – HTTP Compression".to_string(),
            url: "https://developer.mozilla.org/en-US/docs/Web/HTTP/Compression".to_string(),
        }],
        severity: Severity::Warning,
    }
}
