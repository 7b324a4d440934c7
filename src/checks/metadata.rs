//! Essential HTML metadata markers.

use std::sync::LazyLock;
use std::time::Instant;

use scraper::{Html, Selector};
use serde_json::{json, Map, Value};

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::{elapsed_ms, parse_selector_with_fallback};

pub(crate) const ID: &str = "metadata";
pub(crate) const LABEL: &str = "HTML Metadata";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::MetadataStack;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "metadata check"));
static DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name='description']", "metadata check"));
static CHARSET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[charset]", "metadata check"));
static VIEWPORT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name='viewport']", "metadata check"));

/// Checks the page for the four essential metadata markers: title, meta
/// description, charset declaration, and viewport tag. Up to two missing
/// markers is a warning; more means the page head is essentially bare.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let html = match fetch_page(&ctx).await {
        Ok(html) => html,
        Err(e) => {
            log::debug!("Metadata fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to fetch and analyze HTML metadata."));
        }
    };

    let metadata = extract_metadata(&html);
    let missing = metadata.missing();
    let (status, summary) = classify(&missing);

    let mut data = Map::new();
    if let Some(title) = &metadata.title {
        data.insert("title".to_string(), json!(title));
    }
    if let Some(description) = &metadata.description {
        data.insert("description".to_string(), json!(description));
    }
    if let Some(charset) = &metadata.charset {
        data.insert("charset".to_string(), json!(charset));
    }
    if let Some(viewport) = &metadata.viewport {
        data.insert("viewport".to_string(), json!(viewport));
    }
    data.insert("hasAll".to_string(), json!(missing.is_empty()));
    data.insert("missing".to_string(), json!(missing));

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(Value::Object(data))
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

struct PageMetadata {
    title: Option<String>,
    description: Option<String>,
    charset: Option<String>,
    viewport: Option<String>,
}

impl PageMetadata {
    /// Missing marker names in reporting order.
    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        if self.charset.is_none() {
            missing.push("charset");
        }
        if self.viewport.is_none() {
            missing.push("viewport");
        }
        missing
    }
}

/// Pulls the four markers from the document. Empty values count as missing.
fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());
    let description = content_attr(&document, &DESCRIPTION_SELECTOR, "content");
    let charset = content_attr(&document, &CHARSET_SELECTOR, "charset");
    let viewport = content_attr(&document, &VIEWPORT_SELECTOR, "content");

    PageMetadata {
        title,
        description,
        charset,
        viewport,
    }
}

fn content_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn classify(missing: &[&'static str]) -> (CheckStatus, String) {
    if missing.is_empty() {
        return (
            CheckStatus::Ok,
            "All essential metadata is present.".to_string(),
        );
    }
    let status = if missing.len() <= 2 {
        CheckStatus::Warning
    } else {
        CheckStatus::Error
    };
    (status, format!("Missing metadata: {}.", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETE_PAGE: &str = r#"<html><head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <title>Example</title>
        <meta name="description" content="An example page.">
    </head><body></body></html>"#;

    #[test]
    fn extraction_finds_all_four_markers() {
        let metadata = extract_metadata(COMPLETE_PAGE);
        assert_eq!(metadata.title.as_deref(), Some("Example"));
        assert_eq!(metadata.description.as_deref(), Some("An example page."));
        assert_eq!(metadata.charset.as_deref(), Some("utf-8"));
        assert!(metadata.viewport.is_some());
        assert!(metadata.missing().is_empty());
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let metadata = extract_metadata("<html><head><title>  </title></head></html>");
        assert!(metadata.missing().contains(&"title"));
    }

    #[test]
    fn classification_tiers() {
        let (status, summary) = classify(&[]);
        assert_eq!(status, CheckStatus::Ok);
        assert_eq!(summary, "All essential metadata is present.");

        let (status, summary) = classify(&["description", "viewport"]);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "Missing metadata: description, viewport.");

        let (status, _) = classify(&["title", "description", "charset"]);
        assert_eq!(status, CheckStatus::Error);
    }

    #[tokio::test]
    async fn complete_page_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(COMPLETE_PAGE))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);

        let data = result.data.unwrap();
        assert_eq!(data["hasAll"], true);
        assert_eq!(data["title"], "Example");
    }

    #[tokio::test]
    async fn bare_page_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>hi</body></html>"))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Missing metadata: title, description, charset, viewport.")
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Unable to fetch and analyze HTML metadata.")
        );
    }
}
