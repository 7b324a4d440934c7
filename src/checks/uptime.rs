//! Point-in-time availability snapshot.

use std::time::Instant;

use serde_json::json;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "uptime";
pub(crate) const LABEL: &str = "Availability";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::Performance;

/// A single timed HEAD request. Client errors still prove the site is up,
/// so they only warn; server errors and unreachable hosts are errors.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let fetch_start = Instant::now();
    let response = match ctx
        .client
        .head(ctx.url.clone())
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Availability fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Site is unreachable."));
        }
    };
    let response_time = elapsed_ms(fetch_start);

    let status_code = response.status().as_u16();
    let (status, summary) = classify(status_code, response_time);

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "reachable": status_code < 500,
            "statusCode": status_code,
            "responseTimeMs": response_time,
        }))
}

fn classify(status_code: u16, response_time: u64) -> (CheckStatus, String) {
    match status_code {
        200..=399 => (
            CheckStatus::Ok,
            format!("Site is reachable (HTTP {status_code}, {response_time}ms)."),
        ),
        400..=499 => (
            CheckStatus::Warning,
            format!("Site returned client error (HTTP {status_code})."),
        ),
        _ => (
            CheckStatus::Error,
            format!("Site returned server error (HTTP {status_code})."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn classification_bands() {
        let (status, summary) = classify(200, 42);
        assert_eq!(status, CheckStatus::Ok);
        assert_eq!(summary, "Site is reachable (HTTP 200, 42ms).");

        let (status, summary) = classify(404, 10);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "Site returned client error (HTTP 404).");

        let (status, summary) = classify(503, 10);
        assert_eq!(status, CheckStatus::Error);
        assert_eq!(summary, "Site returned server error (HTTP 503).");
    }

    #[tokio::test]
    async fn reachable_site_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        let data = result.data.unwrap();
        assert_eq!(data["reachable"], true);
        assert_eq!(data["statusCode"], 200);
    }

    #[tokio::test]
    async fn client_error_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.data.unwrap()["reachable"], true);
    }

    #[tokio::test]
    async fn server_error_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.data.unwrap()["reachable"], false);
    }

    #[tokio::test]
    async fn unreachable_host_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.summary.as_deref(), Some("Site is unreachable."));
        assert!(result.data.is_none());
    }
}
