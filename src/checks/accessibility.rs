//! Heuristic accessibility audit of the landing page.

use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{json, Map, Value};

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::{elapsed_ms, parse_selector_with_fallback};

pub(crate) const ID: &str = "accessibility";
pub(crate) const LABEL: &str = "Accessibility Hints";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::WebsiteStructure;

static HTML_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("html", "accessibility check"));
static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("h1", "accessibility check"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("img", "accessibility check"));

/// Landmark markers, ARIA roles first. Role and element forms of the same
/// landmark deduplicate by name.
const LANDMARK_MARKERS: &[(&str, &str)] = &[
    ("[role='banner']", "banner"),
    ("[role='navigation']", "navigation"),
    ("[role='main']", "main"),
    ("[role='contentinfo']", "contentinfo"),
    ("header", "header"),
    ("nav", "nav"),
    ("main", "main"),
    ("footer", "footer"),
];

static LANDMARK_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    LANDMARK_MARKERS
        .iter()
        .map(|(selector, name)| {
            (
                *name,
                parse_selector_with_fallback(selector, "accessibility check"),
            )
        })
        .collect()
});

/// Textual skip-link signals, matched against the raw markup.
const SKIP_LINK_PATTERNS: &[&str] = &[
    r#"(?i)href=["']#main"#,
    r#"(?i)href=["']#content"#,
    r#"(?i)href=["']#skip"#,
    r#"(?i)class=["'][^"']*skip[^"']*["']"#,
    r"(?i)skip.{0,10}(to|link|nav)",
];

static SKIP_LINK_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SKIP_LINK_PATTERNS
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("Invalid skip-link pattern '{pattern}': {e}");
                None
            }
        })
        .collect()
});

/// Scans the page for quick accessibility signals: `lang` attribute, a
/// skip link, heading structure, image alt coverage, and page landmarks.
/// This is a smoke test, not a WCAG audit.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let html = match fetch_page(&ctx).await {
        Ok(html) => html,
        Err(e) => {
            log::debug!("Accessibility fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to analyze accessibility hints."));
        }
    };

    let snapshot = audit_page(&html);
    let issues = snapshot.issues();
    let (status, summary) = classify(&issues);

    let mut data = Map::new();
    data.insert("hasLang".to_string(), json!(snapshot.has_lang));
    if let Some(lang) = &snapshot.lang {
        data.insert("lang".to_string(), json!(lang));
    }
    data.insert("hasSkipLink".to_string(), json!(snapshot.has_skip_link));
    data.insert("h1Count".to_string(), json!(snapshot.h1_count));
    data.insert(
        "imagesWithoutAlt".to_string(),
        json!(snapshot.images_without_alt),
    );
    data.insert("totalImages".to_string(), json!(snapshot.total_images));
    data.insert("landmarks".to_string(), json!(snapshot.landmarks));
    data.insert(
        "landmarkCount".to_string(),
        json!(snapshot.landmarks.len()),
    );
    data.insert("issues".to_string(), json!(issues));

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

struct AccessibilitySnapshot {
    has_lang: bool,
    lang: Option<String>,
    has_skip_link: bool,
    h1_count: usize,
    images_without_alt: usize,
    total_images: usize,
    landmarks: Vec<&'static str>,
}

impl AccessibilitySnapshot {
    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.has_lang {
            issues.push("missing lang attribute".to_string());
        }
        if self.h1_count == 0 {
            issues.push("no h1 heading".to_string());
        }
        if self.h1_count > 1 {
            issues.push(format!("multiple h1 ({})", self.h1_count));
        }
        if self.images_without_alt > 0 {
            issues.push(format!("{} images without alt", self.images_without_alt));
        }
        if self.landmarks.len() < 2 {
            issues.push("few landmarks".to_string());
        }
        issues
    }
}

fn audit_page(html: &str) -> AccessibilitySnapshot {
    let document = Html::parse_document(html);

    let lang = document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("lang"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let h1_count = document.select(&H1_SELECTOR).count();

    let mut total_images = 0;
    let mut images_without_alt = 0;
    for img in document.select(&IMG_SELECTOR) {
        total_images += 1;
        if img.value().attr("alt").is_none() {
            images_without_alt += 1;
        }
    }

    let mut landmarks = Vec::new();
    for (name, selector) in LANDMARK_SELECTORS.iter() {
        if document.select(selector).next().is_some() && !landmarks.contains(name) {
            landmarks.push(*name);
        }
    }

    let has_skip_link = SKIP_LINK_RES.iter().any(|re| re.is_match(html));

    AccessibilitySnapshot {
        has_lang: lang.is_some(),
        lang,
        has_skip_link,
        h1_count,
        images_without_alt,
        total_images,
        landmarks,
    }
}

fn classify(issues: &[String]) -> (CheckStatus, String) {
    if issues.is_empty() {
        return (
            CheckStatus::Ok,
            "Good accessibility practices detected.".to_string(),
        );
    }
    if issues.len() <= 2 {
        return (
            CheckStatus::Warning,
            format!("Minor issues: {}.", issues.join(", ")),
        );
    }
    (
        CheckStatus::Error,
        format!("Issues found: {}.", issues.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::context_for;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCESSIBLE_PAGE: &str = r##"<html lang="en"><head><title>t</title></head><body>
        <a href="#main" class="skip-link">Skip to content</a>
        <header>site</header>
        <nav>menu</nav>
        <main id="main"><h1>Welcome</h1><img src="a.png" alt="logo"></main>
        <footer>legal</footer>
    </body></html>"##;

    #[test]
    fn clean_page_has_no_issues() {
        let snapshot = audit_page(ACCESSIBLE_PAGE);
        assert!(snapshot.has_lang);
        assert!(snapshot.has_skip_link);
        assert_eq!(snapshot.h1_count, 1);
        assert_eq!(snapshot.images_without_alt, 0);
        assert!(snapshot.landmarks.len() >= 4);
        assert!(snapshot.issues().is_empty());
    }

    #[test]
    fn missing_lang_and_h1_are_reported() {
        let snapshot =
            audit_page("<html><body><header>x</header><nav>y</nav></body></html>");
        let issues = snapshot.issues();
        assert!(issues.contains(&"missing lang attribute".to_string()));
        assert!(issues.contains(&"no h1 heading".to_string()));
    }

    #[test]
    fn multiple_h1_and_missing_alt_are_reported() {
        let snapshot = audit_page(
            r#"<html lang="en"><body><main><h1>a</h1><h1>b</h1>
               <img src="x.png"><img src="y.png"></main><footer>z</footer></body></html>"#,
        );
        let issues = snapshot.issues();
        assert!(issues.contains(&"multiple h1 (2)".to_string()));
        assert!(issues.contains(&"2 images without alt".to_string()));
    }

    #[test]
    fn landmarks_deduplicate_role_and_element_forms() {
        let snapshot = audit_page(
            r#"<html lang="en"><body><div role="main">x</div><main>y</main></body></html>"#,
        );
        assert_eq!(
            snapshot.landmarks.iter().filter(|l| **l == "main").count(),
            1
        );
    }

    #[test]
    fn classification_tiers() {
        let (status, summary) = classify(&[]);
        assert_eq!(status, CheckStatus::Ok);
        assert_eq!(summary, "Good accessibility practices detected.");

        let one = vec!["no h1 heading".to_string()];
        let (status, summary) = classify(&one);
        assert_eq!(status, CheckStatus::Warning);
        assert_eq!(summary, "Minor issues: no h1 heading.");

        let many = vec![
            "missing lang attribute".to_string(),
            "no h1 heading".to_string(),
            "few landmarks".to_string(),
        ];
        let (status, _) = classify(&many);
        assert_eq!(status, CheckStatus::Error);
    }

    #[tokio::test]
    async fn accessible_page_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ACCESSIBLE_PAGE))
            .mount(&server)
            .await;

        let result = run(context_for(&server.uri())).await;
        assert_eq!(result.status, CheckStatus::Ok);
        let data = result.data.unwrap();
        assert_eq!(data["hasLang"], true);
        assert_eq!(data["h1Count"], 1);
    }

    #[tokio::test]
    async fn unreachable_server_is_error() {
        let result = run(context_for("http://127.0.0.1:1")).await;
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(
            result.summary.as_deref(),
            Some("Unable to analyze accessibility hints.")
        );
    }
}
