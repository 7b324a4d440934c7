//! Response-time and compression signals.

use std::time::Instant;

use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH};
use serde_json::json;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{
    COMPRESSION_SIZE_THRESHOLD, RESPONSE_TIME_ERROR_MS, RESPONSE_TIME_WARNING_MS,
};
use crate::recommendations::{compression_recommendation, slow_response_recommendation};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "performance";
pub(crate) const LABEL: &str = "Performance Signals";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::Performance;

/// Times a full GET of the landing page and inspects the transfer encoding.
/// The request carries an explicit `Accept-Encoding` so the client leaves
/// the response undecoded and `content-encoding` stays observable.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let fetch_start = Instant::now();
    let response = match ctx
        .client
        .get(ctx.url.clone())
        .header(ACCEPT_ENCODING, "gzip, br")
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Performance fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to measure performance metrics."));
        }
    };
    let response_time = elapsed_ms(fetch_start);

    let status_code = response.status().as_u16();
    let compression = compression_label(
        response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
    );
    let content_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let response_size = match content_length {
        Some(length) => length,
        None => match response.bytes().await {
            Ok(body) => body.len() as u64,
            Err(e) => {
                log::debug!("Performance body read failed for {}: {e}", ctx.url);
                0
            }
        },
    };

    let (mut status, mut summary) = classify_timing(response_time);
    let mut recommendation = if response_time > RESPONSE_TIME_WARNING_MS {
        Some(slow_response_recommendation(response_time))
    } else {
        None
    };

    if compression == "none" && response_size > COMPRESSION_SIZE_THRESHOLD {
        if status == CheckStatus::Ok {
            status = CheckStatus::Warning;
        }
        summary.push_str(" Compression not enabled.");
        if recommendation.is_none() {
            recommendation = Some(compression_recommendation());
        }
    } else if compression != "none" {
        summary.push_str(&format!(" Compression: {compression}."));
    }

    let mut result = CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "responseTimeMs": response_time,
            "responseSize": response_size,
            "compression": compression,
            "statusCode": status_code,
        }));
    if let Some(recommendation) = recommendation {
        result = result.with_recommendation(recommendation);
    }
    result
}

fn classify_timing(response_time: u64) -> (CheckStatus, String) {
    if response_time > RESPONSE_TIME_ERROR_MS {
        (
            CheckStatus::Error,
            format!("Slow response time: {response_time}ms."),
        )
    } else if response_time > RESPONSE_TIME_WARNING_MS {
        (
            CheckStatus::Warning,
            format!("Response time is high: {response_time}ms."),
        )
    } else {
        (CheckStatus::Ok, format!("Response time: {response_time}ms."))
    }
}

fn compression_label(content_encoding: &str) -> &'static str {
    if content_encoding.contains("br") {
        "br"
    } else if content_encoding.contains("gzip") {
        "gzip"
    } else {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn timing_tiers() {
        assert_eq!(classify_timing(240).0, CheckStatus::Ok);
        assert_eq!(classify_timing(1001).0, CheckStatus::Warning);
        assert_eq!(classify_timing(2001).0, CheckStatus::Error);
    }

    #[test]
    fn compression_labels() {
        assert_eq!(compression_label("br"), "br");
        assert_eq!(compression_label("gzip"), "gzip");
        assert_eq!(compression_label("gzip, br"), "br");
        assert_eq!(compression_label(""), "none");
        assert_eq!(compression_label("identity"), "none");
    }

    #[tokio::test]
    async fn fast_compressed_response_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-encoding", "gzip")
                    .set_body_string("<html></html>"),
            )
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        let summary = result.summary.unwrap();
        assert!(summary.contains("Compression: gzip."), "{summary}");
        assert_eq!(result.data.unwrap()["compression"], "gzip");
    }

    #[tokio::test]
    async fn large_uncompressed_body_downgrades_to_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(20_000)))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        let summary = result.summary.unwrap();
        assert!(summary.contains("Compression not enabled."), "{summary}");
        let recommendation = result.recommendation.unwrap();
        assert_eq!(recommendation.id, "no-compression");
    }

    #[tokio::test]
    async fn slow_response_is_flagged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(1_100))
                    .set_body_string("ok"),
            )
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.recommendation.is_some());
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Unable to measure performance metrics.")
        );
    }
}
