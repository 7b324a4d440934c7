//! IP intelligence lookup via the ipapi.co JSON API.
//!
//! Enriches a resolved IP address with ASN, ISP, and geographic data.
//! Lookups are best-effort: any transport, HTTP, or decode failure
//! returns `None` so callers can degrade gracefully.

use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding an optional ipapi.co API key.
const IPAPI_KEY_ENV: &str = "IPAPI_KEY";

/// Hosting intelligence for a single IP address.
#[derive(Debug, Clone, Default)]
pub struct IpIntelligence {
    /// Autonomous system number, e.g. "AS13335".
    pub asn: Option<String>,
    /// Network operator / ISP name.
    pub isp: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// City name.
    pub city: Option<String>,
}

/// Raw ipapi.co response. The API signals quota and input errors with
/// `{"error": true, "reason": "..."}` on a 200 response.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    asn: Option<String>,
    org: Option<String>,
    country_name: Option<String>,
    city: Option<String>,
}

/// Looks up hosting intelligence for an IP address.
///
/// Appends the `IPAPI_KEY` environment variable as an API key when set.
/// Returns `None` if the request fails, times out, or the API reports
/// an error, logging the cause at warn level.
///
/// # Arguments
///
/// * `ip` - The IP address to look up
/// * `client` - Shared HTTP client
/// * `timeout` - Per-request deadline
pub async fn lookup_ip_intelligence(
    ip: &str,
    client: &reqwest::Client,
    timeout: Duration,
) -> Option<IpIntelligence> {
    let mut endpoint = format!("https://ipapi.co/{ip}/json/");
    if let Ok(key) = std::env::var(IPAPI_KEY_ENV) {
        if !key.is_empty() {
            endpoint.push_str("?key=");
            endpoint.push_str(&key);
        }
    }
    fetch_intelligence(ip, &endpoint, client, timeout).await
}

/// Fetches and decodes an ipapi.co-shaped response from a specific endpoint.
async fn fetch_intelligence(
    ip: &str,
    endpoint: &str,
    client: &reqwest::Client,
    timeout: Duration,
) -> Option<IpIntelligence> {
    let response = match client.get(endpoint).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("IP intelligence request failed for {ip}: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        log::warn!(
            "IP intelligence lookup for {ip} returned HTTP {}",
            response.status()
        );
        return None;
    }

    let body: IpApiResponse = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Failed to decode IP intelligence response for {ip}: {e}");
            return None;
        }
    };

    if body.error {
        log::warn!(
            "IP intelligence lookup rejected for {ip}: {}",
            body.reason.as_deref().unwrap_or("unknown reason")
        );
        return None;
    }

    Some(IpIntelligence {
        asn: body.asn,
        isp: body.org,
        country: body.country_name,
        city: body.city,
    })
}
