//! The inspection entry point tying validation, rate limiting, and the
//! check battery together.

use std::time::Duration;

use log::{info, warn};

use crate::app::url::validate_and_normalize_url;
use crate::checks::{run_checks, CheckContext, ChecksResponse};
use crate::error_handling::InspectError;
use crate::initialization::Resources;

/// Runs the full check battery against one URL.
///
/// Validates and normalizes the URL, charges the caller's rate-limit
/// window, then dispatches every registered check concurrently. Individual
/// check failures are folded into the response as `error` results; the
/// only failures surfaced here are the ones that stop a run from starting.
///
/// `caller_id` identifies who is asking, e.g. `"cli"` for the bundled
/// binary. Each caller gets its own rate-limit window.
///
/// # Errors
///
/// Returns [`InspectError::InvalidUrl`] when the URL cannot be normalized
/// into an http(s) target, and [`InspectError::RateLimited`] when the
/// caller's window is exhausted.
pub async fn inspect_site(
    resources: &Resources,
    raw_url: &str,
    caller_id: &str,
    timeout: Duration,
) -> Result<ChecksResponse, InspectError> {
    let url = validate_and_normalize_url(raw_url)?;
    let hostname = url
        .host_str()
        .map(str::to_owned)
        .ok_or_else(|| InspectError::InvalidUrl(raw_url.to_string()))?;

    let decision = resources.rate_limiter.check(caller_id).await;
    if !decision.allowed {
        warn!(
            "Rate limit exceeded for caller '{}'; window resets at {}",
            caller_id, decision.reset_at
        );
        return Err(InspectError::RateLimited {
            reset_at: decision.reset_at,
        });
    }

    info!("Inspecting {url} (caller '{caller_id}')");
    let ctx = CheckContext::new(
        url,
        hostname,
        timeout,
        resources.client.clone(),
        resources.redirect_client.clone(),
        resources.dns.clone(),
    );

    Ok(run_checks(&ctx).await)
}
