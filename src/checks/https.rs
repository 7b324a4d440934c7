//! HTTPS availability, HTTP-to-HTTPS enforcement, and TLS details.

use std::time::Instant;

use serde_json::{json, Value};
use url::Url;

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus, Recommendation};
use crate::config::HEADER_STRICT_TRANSPORT_SECURITY;
use crate::recommendations::{hsts_recommendation, https_recommendation};
use crate::tls::{probe_certificate, TlsDetails};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "https";
pub(crate) const LABEL: &str = "HTTPS & TLS";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::HttpSecurity;

/// Checks that the target serves HTTPS, that plain HTTP redirects to it,
/// and whether HSTS is enabled.
///
/// Certificate details are collected best-effort through a direct TLS
/// handshake; a failed handshake leaves those fields empty without
/// affecting classification.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let is_https = ctx.url.scheme() == "https";
    let https_url = with_scheme(&ctx.url, "https");

    let https_available = match ctx
        .redirect_client
        .head(https_url.clone())
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response.status().as_u16() < 500,
        Err(e) => {
            log::debug!("HTTPS availability probe failed for {https_url}: {e}");
            false
        }
    };

    let mut http_redirects = false;
    if !is_https {
        let http_url = with_scheme(&ctx.url, "http");
        match ctx.client.head(http_url).timeout(ctx.timeout).send().await {
            Ok(response) => http_redirects = response.url().scheme() == "https",
            Err(e) => log::debug!("HTTP redirect probe failed for {}: {e}", ctx.url),
        }
    }

    let mut has_hsts = false;
    let mut tls: Option<TlsDetails> = None;
    if https_available {
        if let Ok(response) = ctx
            .client
            .head(https_url.clone())
            .timeout(ctx.timeout)
            .send()
            .await
        {
            has_hsts = response
                .headers()
                .contains_key(HEADER_STRICT_TRANSPORT_SECURITY);
        }

        match probe_certificate(&ctx.hostname).await {
            Ok(details) => tls = Some(details),
            Err(e) => log::debug!("Certificate probe failed for {}: {e}", ctx.hostname),
        }
    }

    let (status, summary, recommendation) =
        classify(https_available, is_https, http_redirects, has_hsts);

    let mut data = serde_json::Map::new();
    data.insert("httpsAvailable".to_string(), json!(https_available));
    data.insert("httpRedirects".to_string(), json!(http_redirects));
    if let Some(details) = &tls {
        if let Some(version) = &details.version {
            data.insert("tlsVersion".to_string(), json!(version));
        }
        if let Some(issuer) = &details.issuer {
            data.insert("certificateIssuer".to_string(), json!(issuer));
        }
        if let Some(expires_at) = details.expires_at {
            data.insert("certificateExpiry".to_string(), json!(expires_at.to_rfc3339()));
        }
        if let Some(days) = details.days_until_expiry {
            data.insert("daysUntilExpiry".to_string(), json!(days));
        }
    }

    let mut result = CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data));
    result.recommendation = recommendation;
    result
}

/// Swaps the URL scheme, returning the original URL if the swap is not
/// permitted.
fn with_scheme(url: &Url, scheme: &str) -> Url {
    let mut swapped = url.clone();
    if swapped.set_scheme(scheme).is_err() {
        return url.clone();
    }
    swapped
}

fn classify(
    https_available: bool,
    is_https: bool,
    http_redirects: bool,
    has_hsts: bool,
) -> (CheckStatus, &'static str, Option<Recommendation>) {
    if !https_available && !http_redirects {
        return (
            CheckStatus::Error,
            "HTTPS is not available and HTTP does not redirect to HTTPS.",
            Some(https_recommendation()),
        );
    }
    if !https_available {
        return (
            CheckStatus::Warning,
            "HTTPS is not directly available, but HTTP redirects to HTTPS.",
            None,
        );
    }
    if !is_https && !http_redirects {
        return (
            CheckStatus::Warning,
            "HTTPS is available but HTTP does not redirect to HTTPS.",
            Some(https_recommendation()),
        );
    }
    let recommendation = if has_hsts {
        None
    } else {
        Some(hsts_recommendation())
    };
    (
        CheckStatus::Ok,
        "HTTPS is properly configured.",
        recommendation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;

    #[test]
    fn unavailable_without_redirect_is_error() {
        let (status, summary, recommendation) = classify(false, true, false, false);
        assert_eq!(status, CheckStatus::Error);
        assert_eq!(
            summary,
            "HTTPS is not available and HTTP does not redirect to HTTPS."
        );
        assert_eq!(recommendation.unwrap().id, "https-not-enforced");
    }

    #[test]
    fn redirecting_http_without_direct_https_is_warning() {
        let (status, summary, recommendation) = classify(false, false, true, false);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(
            summary,
            "HTTPS is not directly available, but HTTP redirects to HTTPS."
        );
        assert!(recommendation.is_none());
    }

    #[test]
    fn https_ok_but_http_not_redirecting_is_warning() {
        let (status, summary, recommendation) = classify(true, false, false, true);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "HTTPS is available but HTTP does not redirect to HTTPS.");
        assert_eq!(recommendation.unwrap().id, "https-not-enforced");
    }

    #[test]
    fn missing_hsts_keeps_ok_status_with_recommendation() {
        let (status, summary, recommendation) = classify(true, true, false, false);
        assert_eq!(status, CheckStatus::Ok);
        assert_eq!(summary, "HTTPS is properly configured.");
        assert_eq!(recommendation.unwrap().id, "missing-hsts");
    }

    #[test]
    fn fully_configured_target_has_no_recommendation() {
        let (status, _, recommendation) = classify(true, true, false, true);
        assert_eq!(status, CheckStatus::Ok);
        assert!(recommendation.is_none());
    }

    #[test]
    fn scheme_swap_preserves_rest_of_url() {
        let url = Url::parse("http://example.com:8080/path?q=1").unwrap();
        let swapped = with_scheme(&url, "https");
        assert_eq!(swapped.as_str(), "https://example.com:8080/path?q=1");
    }

    #[tokio::test]
    async fn unreachable_target_is_error() {
        let result = run(context_for("https://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        let data = result.data.unwrap();
        assert_eq!(data["httpsAvailable"], false);
        assert_eq!(data["httpRedirects"], false);
    }
}
