//! security.txt discovery per RFC 9116.

use std::time::Instant;

use regex::Regex;
use serde_json::{json, Value};

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "security-txt";
pub(crate) const LABEL: &str = "security.txt";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::HttpSecurity;

const FIELD_NAME_PATTERN: &str = r"^([A-Za-z-]+):";

/// Looks for a security.txt under `/.well-known/` with a fallback to the
/// site root.
///
/// The file counts as found only when it carries a `Contact:` field. A
/// missing file is a warning, not an error, since the artifact is
/// optional.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let origin = ctx.origin();
    let locations = [
        format!("{origin}/.well-known/security.txt"),
        format!("{origin}/security.txt"),
    ];

    let mut found_location: Option<String> = None;
    let mut content: Option<String> = None;

    for location in &locations {
        let response = match ctx
            .client
            .get(location)
            .timeout(ctx.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::debug!("security.txt fetch failed for {location}: {e}");
                continue;
            }
        };
        if response.status().as_u16() != 200 {
            continue;
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("security.txt body read failed for {location}: {e}");
                continue;
            }
        };
        if body.to_lowercase().contains("contact:") {
            found_location = Some(location.clone());
            content = Some(body);
            break;
        }
    }

    let present = content.is_some();
    let body = content.unwrap_or_default();
    let lowercase = body.to_lowercase();
    let has_contact = lowercase.contains("contact:");
    let has_expires = lowercase.contains("expires:");
    let fields = extract_field_names(&body);

    let (status, summary) = if !present {
        (
            CheckStatus::Warning,
            "security.txt not found. Consider adding one for security researchers.".to_string(),
        )
    } else if !has_expires {
        (
            CheckStatus::Warning,
            "security.txt found but missing Expires field (required by RFC 9116).".to_string(),
        )
    } else {
        (
            CheckStatus::Ok,
            format!("security.txt found with {} fields.", fields.len()),
        )
    };

    let mut data = serde_json::Map::new();
    data.insert("present".to_string(), json!(present));
    if let Some(location) = &found_location {
        data.insert("location".to_string(), json!(location));
    }
    data.insert("hasContact".to_string(), json!(has_contact));
    data.insert("hasExpires".to_string(), json!(has_expires));
    data.insert("fields".to_string(), json!(fields));

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
}

/// Extracts distinct field names from security.txt lines, preserving
/// their original casing and order of first appearance.
fn extract_field_names(content: &str) -> Vec<String> {
    let re = match Regex::new(FIELD_NAME_PATTERN) {
        Ok(re) => re,
        Err(e) => {
            log::error!("Failed to compile security.txt field regex: {e}");
            return Vec::new();
        }
    };
    let mut fields: Vec<String> = Vec::new();
    for line in content.lines() {
        if let Some(captures) = re.captures(line) {
            if let Some(name) = captures.get(1) {
                let name = name.as_str().to_string();
                if !fields.contains(&name) {
                    fields.push(name);
                }
            }
        }
    }
    fields
}
