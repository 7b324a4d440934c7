//! Sitemap discovery at the conventional location.

use std::time::Instant;

use serde_json::{Map, Value};

use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "sitemap";
pub(crate) const LABEL: &str = "Sitemap";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::WebsiteStructure;

/// Fetches /sitemap.xml and classifies it as a plain url set or a sitemap
/// index. A missing or unfetchable sitemap is only a warning; plenty of
/// healthy sites serve none at this path.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let sitemap_url = format!("{}/sitemap.xml", ctx.origin());
    let response = match ctx
        .client
        .get(&sitemap_url)
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Sitemap fetch failed for {sitemap_url}: {e}");
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Warning, elapsed_ms(start))
                .with_summary("Unable to fetch sitemap.");
        }
    };

    let present = response.status().is_success();
    let content = if present {
        match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::debug!("Sitemap body read failed for {sitemap_url}: {e}");
                return CheckResult::new(
                    ID,
                    LABEL,
                    CATEGORY,
                    CheckStatus::Warning,
                    elapsed_ms(start),
                )
                .with_summary("Unable to fetch sitemap.");
            }
        }
    } else {
        String::new()
    };

    let detected = detect_format(&content);
    let (status, summary) = if !present {
        (
            CheckStatus::Warning,
            "Sitemap not found at /sitemap.xml.".to_string(),
        )
    } else if let Some((format, url_count)) = &detected {
        let count_note = if *url_count > 0 {
            format!(", ~{url_count} URLs")
        } else {
            String::new()
        };
        (
            CheckStatus::Ok,
            format!("Sitemap found ({format} format{count_note})."),
        )
    } else {
        (
            CheckStatus::Warning,
            "Sitemap found but format is unclear.".to_string(),
        )
    };

    let mut data = Map::new();
    data.insert("present".to_string(), Value::Bool(present));
    if let Some((format, url_count)) = detected {
        data.insert("format".to_string(), Value::String(format.to_string()));
        data.insert("urlCount".to_string(), Value::from(url_count));
    }
    data.insert("sitemapUrl".to_string(), Value::String(sitemap_url));

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
}

/// Returns the sitemap flavor and entry count, or `None` when the body does
/// not look like either sitemap format.
fn detect_format(content: &str) -> Option<(&'static str, usize)> {
    if content.contains("<sitemapindex") {
        Some(("index", content.matches("<sitemap>").count()))
    } else if content.contains("<urlset") {
        Some(("xml", content.matches("<url>").count()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn detects_url_sets_and_indexes() {
        assert_eq!(
            detect_format("<urlset><url><loc>a</loc></url><url><loc>b</loc></url></urlset>"),
            Some(("xml", 2))
        );
        assert_eq!(
            detect_format("<sitemapindex><sitemap><loc>a</loc></sitemap></sitemapindex>"),
            Some(("index", 1))
        );
        assert_eq!(detect_format("<html><body>not a sitemap</body></html>"), None);
    }

    #[tokio::test]
    async fn url_set_sitemap_is_ok_with_count() {
        let server = MockServer::start().await;
        let body = r#"<?xml version="1.0"?><urlset><url><loc>/a</loc></url><url><loc>/b</loc></url></urlset>"#;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(
            result.summary.as_deref(),
            Some("Sitemap found (xml format, ~2 URLs).")
        );

        let data = result.data.unwrap();
        assert_eq!(data["format"], "xml");
        assert_eq!(data["urlCount"], 2);
    }

    #[tokio::test]
    async fn missing_sitemap_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(
            result.summary.as_deref(),
            Some("Sitemap not found at /sitemap.xml.")
        );

        let data = result.data.unwrap();
        assert_eq!(data["present"], false);
        assert!(data.get("format").is_none());
    }

    #[tokio::test]
    async fn unrecognized_body_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(
            result.summary.as_deref(),
            Some("Sitemap found but format is unclear.")
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_warning() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.summary.as_deref(), Some("Unable to fetch sitemap."));
    }
}
