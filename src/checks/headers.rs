//! Security header presence check.

use std::time::Instant;

use serde_json::json;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::RECOMMENDED_SECURITY_HEADERS;
use crate::recommendations::security_headers_recommendation;
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "headers";
pub(crate) const LABEL: &str = "HTTP Security Headers";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::HttpSecurity;

/// Checks the target for the recommended set of HTTP security headers.
///
/// All present is ok, a partial set is a warning, and none present (or a
/// failed fetch) is an error.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let response = match ctx
        .client
        .head(ctx.url.clone())
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Security header fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to fetch headers."));
        }
    };

    let mut present: Vec<&str> = Vec::new();
    let mut missing: Vec<&str> = Vec::new();
    for header in RECOMMENDED_SECURITY_HEADERS {
        if response.headers().contains_key(*header) {
            present.push(header);
        } else {
            missing.push(header);
        }
    }

    let status = if missing.is_empty() {
        CheckStatus::Ok
    } else if !present.is_empty() {
        CheckStatus::Warning
    } else {
        CheckStatus::Error
    };

    let summary = if missing.is_empty() {
        "All recommended security headers are present.".to_string()
    } else {
        format!("Missing {} recommended security headers.", missing.len())
    };

    let mut result = CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "present": present,
            "missing": missing,
        }));
    if !missing.is_empty() {
        result.recommendation = Some(security_headers_recommendation(&missing));
    }
    result
}
