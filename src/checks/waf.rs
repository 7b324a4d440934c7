//! WAF and CDN provider detection from response headers.

use std::time::Instant;

use serde_json::{json, Map, Value};

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{HEADER_SERVER, WAF_HEADER_PROVIDERS, WAF_SERVER_SUBSTRINGS};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "waf";
pub(crate) const LABEL: &str = "WAF & CDN";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::Infrastructure;

/// Looks for provider-specific response headers (`cf-ray`,
/// `x-fastly-request-id`, ...) and provider names in the `server` value.
/// Absence is only a warning; plenty of sites terminate TLS themselves.
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
            log::debug!("WAF fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to detect WAF or CDN."));
        }
    };

    let headers = response.headers();
    let mut provider: Option<&'static str> = None;
    let mut matched: Vec<&'static str> = Vec::new();

    for &(header, name) in WAF_HEADER_PROVIDERS {
        if headers.contains_key(header) {
            matched.push(header);
            provider.get_or_insert(name);
        }
    }

    let server = headers
        .get(HEADER_SERVER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();
    for &(needle, name) in WAF_SERVER_SUBSTRINGS {
        if server.contains(needle) {
            if !matched.contains(&HEADER_SERVER) {
                matched.push(HEADER_SERVER);
            }
            provider.get_or_insert(name);
            break;
        }
    }

    let (status, summary) = match provider {
        Some(provider) => (
            CheckStatus::Ok,
            format!("WAF/CDN detected: {provider}."),
        ),
        None => (
            CheckStatus::Warning,
            "No WAF or CDN detected.".to_string(),
        ),
    };

    let mut data = Map::new();
    data.insert("detected".to_string(), json!(matched));
    if let Some(provider) = provider {
        data.insert("provider".to_string(), json!(provider));
    }

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn cloudflare_header_is_detected() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).insert_header("cf-ray", "8f2a-IAD"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(
            result.summary.as_deref(),
            Some("WAF/CDN detected: Cloudflare.")
        );
        let data = result.data.unwrap();
        assert_eq!(data["provider"], "Cloudflare");
        assert!(data["detected"]
            .as_array()
            .unwrap()
            .contains(&json!("cf-ray")));
    }

    #[tokio::test]
    async fn server_value_substring_is_detected() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).insert_header("server", "CloudFront"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(
            result.summary.as_deref(),
            Some("WAF/CDN detected: AWS CloudFront.")
        );
        assert_eq!(result.data.unwrap()["detected"][0], "server");
    }

    #[tokio::test]
    async fn plain_headers_are_warning() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).insert_header("server", "nginx"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.summary.as_deref(), Some("No WAF or CDN detected."));
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Unable to detect WAF or CDN.")
        );
    }
}
