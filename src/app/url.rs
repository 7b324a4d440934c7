//! URL validation and normalization.

use log::warn;
use url::Url;

use crate::error_handling::InspectError;

/// Maximum accepted URL length, matching common browser and server
/// limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a user-supplied URL.
///
/// Bare hostnames get an `https://` prefix; explicit `http://` is
/// preserved so plain-HTTP sites can be inspected too. Rejects empty
/// input, URLs longer than `MAX_URL_LENGTH`, unparseable URLs, and
/// anything without a host.
///
/// # Errors
///
/// Returns [`InspectError::InvalidUrl`] carrying the original input.
pub fn validate_and_normalize_url(url: &str) -> Result<Url, InspectError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        warn!("Rejecting empty URL");
        return Err(InspectError::InvalidUrl(url.to_string()));
    }

    // Length is checked before normalization so oversized input is
    // rejected without allocating the prefixed copy.
    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_URL_LENGTH,
            &trimmed[..50.min(trimmed.len())]
        );
        return Err(InspectError::InvalidUrl(url.to_string()));
    }

    let normalized = if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    // The prefix can push an input just under the limit over it.
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return Err(InspectError::InvalidUrl(url.to_string()));
    }

    let parsed = match Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Rejecting invalid URL '{url}': {e}");
            return Err(InspectError::InvalidUrl(url.to_string()));
        }
    };

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            warn!("Rejecting unsupported scheme '{scheme}' for URL: {url}");
            return Err(InspectError::InvalidUrl(url.to_string()));
        }
    }
    if parsed.host_str().is_none() {
        warn!("Rejecting URL without a host: {url}");
        return Err(InspectError::InvalidUrl(url.to_string()));
    }

    Ok(parsed)
}
