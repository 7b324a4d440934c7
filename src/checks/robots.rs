//! robots.txt presence and shape.

use std::time::Instant;

use serde_json::json;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::ROBOTS_CONTENT_PREVIEW_CHARS;
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "robots";
pub(crate) const LABEL: &str = "robots.txt";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::WebsiteStructure;

const VALIDITY_MARKERS: &[&str] = &["User-agent:", "Disallow:", "Allow:", "Sitemap:"];

/// Fetches /robots.txt from the origin and sanity-checks its content for
/// the directives a real robots file carries.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let robots_url = format!("{}/robots.txt", ctx.origin());
    let response = match ctx
        .client
        .get(&robots_url)
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("robots.txt fetch failed for {robots_url}: {e}");
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to fetch robots.txt."));
        }
    };

    let status_code = response.status().as_u16();
    let present = status_code == 200;
    let content = if present {
        match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return CheckResult::new(
                    ID,
                    LABEL,
                    CATEGORY,
                    CheckStatus::Error,
                    elapsed_ms(start),
                )
                .with_summary(failure_summary(&e, "Unable to fetch robots.txt."));
            }
        }
    } else {
        String::new()
    };

    let is_valid = present && looks_valid(&content);
    let (status, summary) = if !present {
        (CheckStatus::Warning, "robots.txt is not present.")
    } else if !is_valid {
        (
            CheckStatus::Warning,
            "robots.txt is present but may be invalid or empty.",
        )
    } else {
        (CheckStatus::Ok, "robots.txt is present and appears valid.")
    };

    let preview: String = content.chars().take(ROBOTS_CONTENT_PREVIEW_CHARS).collect();
    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "present": present,
            "status": status_code,
            "isValid": is_valid,
            "content": preview,
        }))
}

fn looks_valid(content: &str) -> bool {
    VALIDITY_MARKERS.iter().any(|marker| content.contains(marker))
}
