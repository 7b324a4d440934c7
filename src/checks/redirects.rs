//! Redirect chain analysis.

use std::time::Instant;

use reqwest::header::LOCATION;
use serde_json::json;
use url::Url;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{MAX_REDIRECT_HOPS, REDIRECT_WARNING_THRESHOLD};
use crate::recommendations::{excessive_redirects_recommendation, redirect_loop_recommendation};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "redirects";
pub(crate) const LABEL: &str = "Redirect Behavior";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::HttpSecurity;

/// Walks the redirect chain hop by hop with following disabled, recording
/// each intermediate URL and watching for loops.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let mut current: Url = ctx.url.clone();
    let mut chain: Vec<String> = vec![current.to_string()];
    let mut redirect_count: usize = 0;
    let mut has_loop = false;

    for _ in 0..MAX_REDIRECT_HOPS {
        let response = match ctx
            .redirect_client
            .head(current.clone())
            .timeout(ctx.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Redirect walk failed at {current}: {e}");
                return CheckResult::new(
                    ID,
                    LABEL,
                    CATEGORY,
                    CheckStatus::Error,
                    elapsed_ms(start),
                )
                .with_summary(failure_summary(&e, "Unable to analyze redirect behavior."));
            }
        };

        if !matches!(response.status().as_u16(), 301 | 302 | 303 | 307 | 308) {
            break;
        }
        let location = match response.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
            Some(location) => location,
            None => break,
        };
        let next = match current.join(location) {
            Ok(next) => next,
            Err(e) => {
                log::debug!("Unparseable Location '{location}' from {current}: {e}");
                break;
            }
        };

        let next_str = next.to_string();
        if chain.contains(&next_str) {
            has_loop = true;
            break;
        }
        chain.push(next_str);
        current = next;
        redirect_count += 1;
    }

    let (status, summary, recommendation) = if has_loop {
        (
            CheckStatus::Error,
            "Redirect loop detected.".to_string(),
            Some(redirect_loop_recommendation()),
        )
    } else if redirect_count > REDIRECT_WARNING_THRESHOLD {
        (
            CheckStatus::Warning,
            format!("Excessive redirects detected ({redirect_count} redirects)."),
            Some(excessive_redirects_recommendation(redirect_count)),
        )
    } else if redirect_count > 0 {
        (
            CheckStatus::Ok,
            format!("Redirect chain: {redirect_count} redirect(s) to final URL."),
            None,
        )
    } else {
        (CheckStatus::Ok, "No redirects detected.".to_string(), None)
    };

    let mut result = CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "redirectCount": redirect_count,
            "finalUrl": current.to_string(),
            "redirectChain": chain,
            "hasLoop": has_loop,
        }));
    result.recommendation = recommendation;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn no_redirects_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.summary.as_deref(), Some("No redirects detected."));

        let data = result.data.unwrap();
        assert_eq!(data["redirectCount"], 0);
        assert_eq!(data["hasLoop"], false);
    }

    #[tokio::test]
    async fn single_redirect_is_ok_with_chain() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/target"))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/target"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(
            result.summary.as_deref(),
            Some("Redirect chain: 1 redirect(s) to final URL.")
        );

        let data = result.data.unwrap();
        assert_eq!(data["redirectCount"], 1);
        assert!(data["finalUrl"].as_str().unwrap().ends_with("/target"));
        assert_eq!(data["redirectChain"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn self_loop_is_error_with_recommendation() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.summary.as_deref(), Some("Redirect loop detected."));
        assert!(result.recommendation.is_some());

        let data = result.data.unwrap();
        assert_eq!(data["hasLoop"], true);
        assert_eq!(data["redirectCount"], 0);
    }

    #[tokio::test]
    async fn long_chain_is_warning_with_recommendation() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/hop1"))
            .mount(&server)
            .await;
        for hop in 1..6 {
            Mock::given(method("HEAD"))
                .and(path(format!("/hop{hop}")))
                .respond_with(
                    ResponseTemplate::new(301)
                        .insert_header("location", format!("/hop{}", hop + 1)),
                )
                .mount(&server)
                .await;
        }
        Mock::given(method("HEAD"))
            .and(path("/hop6"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(
            result.summary.as_deref(),
            Some("Excessive redirects detected (6 redirects).")
        );
        assert!(result.recommendation.is_some());
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Unable to analyze redirect behavior.")
        );
        assert!(result.data.is_none());
    }
}
