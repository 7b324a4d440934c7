//! Server software disclosure via response headers.

use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{HEADER_SERVER, HEADER_X_POWERED_BY, INFO_LEAK_HEADERS};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "server-headers";
pub(crate) const LABEL: &str = "Server Headers";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::MetadataStack;

/// A product/version marker such as `nginx/1.25.3`. A bare product name
/// without a version is acceptable disclosure.
static SERVER_VERSION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| match Regex::new(r"/\d") {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("Invalid server version pattern: {e}");
            None
        }
    });

/// Looks for headers that disclose server software. `X-Powered-By`, known
/// version-leaking headers, or a versioned `server` value warrant a warning;
/// a bare product name in `server` is fine.
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
            log::debug!("Server headers fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to analyze server headers."));
        }
    };

    let headers = response.headers();
    let server = header_value(headers, HEADER_SERVER);
    let powered_by = header_value(headers, HEADER_X_POWERED_BY);

    let mut leaking: Vec<&str> = Vec::new();
    if powered_by.is_some() {
        leaking.push(HEADER_X_POWERED_BY);
    }
    for &header in INFO_LEAK_HEADERS {
        if headers.contains_key(header) {
            leaking.push(header);
        }
    }
    let versioned_server = server
        .as_deref()
        .is_some_and(|v| SERVER_VERSION_RE.as_ref().is_some_and(|re| re.is_match(v)));
    if versioned_server {
        leaking.push(HEADER_SERVER);
    }

    let (status, summary) = classify(server.as_deref(), powered_by.is_some(), &leaking);

    let mut data = Map::new();
    if let Some(server) = &server {
        data.insert("server".to_string(), json!(server));
    }
    if let Some(powered_by) = &powered_by {
        data.insert("poweredBy".to_string(), json!(powered_by));
    }
    data.insert("leakingHeaders".to_string(), json!(leaking));

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
}

fn header_value(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}

fn classify(server: Option<&str>, powered_by: bool, leaking: &[&str]) -> (CheckStatus, String) {
    if powered_by {
        return (
            CheckStatus::Warning,
            "X-Powered-By header exposes server information.".to_string(),
        );
    }
    if !leaking.is_empty() {
        return (
            CheckStatus::Warning,
            "Server headers may expose unnecessary information.".to_string(),
        );
    }
    match server {
        Some(server) => (CheckStatus::Ok, format!("Server: {server}")),
        None => (
            CheckStatus::Ok,
            "No server information exposed in headers.".to_string(),
        ),
    }
}
