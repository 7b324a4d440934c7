//! Outbound link extraction and reachability sampling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use scraper::Html;
use serde_json::json;
use url::Url;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{LINK_CHECK_TIMEOUT_MS, LINK_SAMPLE_SIZE, UNREACHABLE_SAMPLE_LIMIT};
use crate::utils::{elapsed_ms, parse_selector_with_fallback};

pub(crate) const ID: &str = "links";
pub(crate) const LABEL: &str = "Linked Pages";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::WebsiteStructure;

/// Collects the page's anchors, splits them into internal and external, and
/// HEAD-probes a small sample for reachability. Each probe carries its own
/// short timeout so one dead link cannot stall the whole check.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let html = match fetch_page(&ctx).await {
        Ok(html) => html,
        Err(e) => {
            log::debug!("Link check fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to analyze links."));
        }
    };

    let (internal, external) = extract_links(&html, &ctx.url);

    let sampled: Vec<String> = internal
        .iter()
        .chain(external.iter())
        .take(LINK_SAMPLE_SIZE)
        .cloned()
        .collect();
    let probes = sampled.into_iter().map(|link| {
        let client = Arc::clone(&ctx.client);
        async move {
            let reachable = match client
                .head(&link)
                .timeout(Duration::from_millis(LINK_CHECK_TIMEOUT_MS))
                .send()
                .await
            {
                Ok(response) => response.status().as_u16() < 400,
                Err(_) => false,
            };
            (link, reachable)
        }
    });
    let unreachable: Vec<String> = join_all(probes)
        .await
        .into_iter()
        .filter(|(_, reachable)| !reachable)
        .map(|(link, _)| link)
        .collect();

    let (status, summary) = if !unreachable.is_empty() {
        (
            CheckStatus::Warning,
            format!(
                "Found {} internal and {} external links. {} link(s) appear unreachable.",
                internal.len(),
                external.len(),
                unreachable.len()
            ),
        )
    } else if internal.is_empty() && external.is_empty() {
        (
            CheckStatus::Warning,
            "No links found on the page.".to_string(),
        )
    } else {
        (
            CheckStatus::Ok,
            format!(
                "Found {} internal and {} external links.",
                internal.len(),
                external.len()
            ),
        )
    };

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "internalCount": internal.len(),
            "externalCount": external.len(),
            "unreachableCount": unreachable.len(),
            "unreachable": unreachable
                .iter()
                .take(UNREACHABLE_SAMPLE_LIMIT)
                .collect::<Vec<_>>(),
        }))
}

async fn fetch_page(ctx: &CheckContext) -> Result<String, reqwest::Error> {
    ctx.client
        .get(ctx.url.clone())
        .timeout(ctx.timeout)
        .send()
        .await?
        .text()
        .await
}

/// Resolves every anchor href against the page URL and buckets it by origin.
/// Fragment-only, javascript:, and mailto: links are navigation noise and
/// are skipped; hrefs that do not resolve are skipped too.
fn extract_links(html: &str, base: &Url) -> (Vec<String>, Vec<String>) {
    let document = Html::parse_document(html);
    let anchors = parse_selector_with_fallback("a[href]", "link check");

    let mut internal: Vec<String> = Vec::new();
    let mut external: Vec<String> = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.origin() == base.origin() {
            internal.push(resolved.to_string());
        } else {
            external.push(resolved.to_string());
        }
    }
    (internal, external)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn extraction_buckets_by_origin_and_skips_noise() {
        let base = Url::parse("https://example.com/page").unwrap();
        let html = r##"<html><body>
            <a href="/about">About</a>
            <a href="https://example.com/contact">Contact</a>
            <a href="https://other.example.net/">Elsewhere</a>
            <a href="#section">Jump</a>
            <a href="javascript:void(0)">Noop</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="">Empty</a>
        </body></html>"##;

        let (internal, external) = extract_links(html, &base);
        assert_eq!(internal.len(), 2);
        assert_eq!(external, vec!["https://other.example.net/".to_string()]);
    }

    #[tokio::test]
    async fn reachable_links_are_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/good">good</a> <a href="/also-good">also</a>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(
            result.summary.as_deref(),
            Some("Found 2 internal and 0 external links.")
        );
    }

    #[tokio::test]
    async fn dead_link_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/good">good</a> <a href="/gone">gone</a>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/good"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(
            result.summary.as_deref(),
            Some("Found 2 internal and 0 external links. 1 link(s) appear unreachable.")
        );

        let data = result.data.unwrap();
        assert_eq!(data["unreachableCount"], 1);
        assert!(data["unreachable"][0]
            .as_str()
            .unwrap()
            .ends_with("/gone"));
    }

    #[tokio::test]
    async fn link_free_page_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>no links here</p>"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.summary.as_deref(), Some("No links found on the page."));
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.summary.as_deref(), Some("Unable to analyze links."));
    }
}
