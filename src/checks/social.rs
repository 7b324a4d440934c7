//! Open Graph and Twitter Card sharing tags.

use std::sync::LazyLock;
use std::time::Instant;

use scraper::{Html, Selector};
use serde_json::{json, Map, Value};

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::utils::{elapsed_ms, parse_selector_with_fallback};

pub(crate) const ID: &str = "social";
pub(crate) const LABEL: &str = "Social Tags";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::MetadataStack;

static OG_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[property='og:title']", "social check"));
static OG_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback("meta[property='og:description']", "social check")
});
static OG_IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[property='og:image']", "social check"));
static TWITTER_CARD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name='twitter:card']", "social check"));
static TWITTER_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name='twitter:title']", "social check"));
static TWITTER_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback("meta[name='twitter:description']", "social check")
});

/// Checks for the two social sharing tag families. Open Graph uses
/// `property` attributes, Twitter Cards use `name`; a family counts as
/// present when any of its tags is found.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let html = match fetch_page(&ctx).await {
        Ok(html) => html,
        Err(e) => {
            log::debug!("Social tags fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to analyze social tags."));
        }
    };

    let tags = extract_social_tags(&html);
    let (status, summary) = classify(tags.has_open_graph(), tags.has_twitter_card());

    let mut data = Map::new();
    data.insert("openGraph".to_string(), json!(tags.has_open_graph()));
    data.insert("twitterCard".to_string(), json!(tags.has_twitter_card()));
    if let Some(title) = &tags.og_title {
        data.insert("ogTitle".to_string(), json!(title));
    }
    if let Some(description) = &tags.og_description {
        data.insert("ogDescription".to_string(), json!(description));
    }
    if let Some(image) = &tags.og_image {
        data.insert("ogImage".to_string(), json!(image));
    }
    if let Some(title) = &tags.twitter_title {
        data.insert("twitterTitle".to_string(), json!(title));
    }
    if let Some(description) = &tags.twitter_description {
        data.insert("twitterDescription".to_string(), json!(description));
    }

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

#[derive(Default)]
struct SocialTags {
    og_title: Option<String>,
    og_description: Option<String>,
    og_image: Option<String>,
    twitter_card: Option<String>,
    twitter_title: Option<String>,
    twitter_description: Option<String>,
}

impl SocialTags {
    fn has_open_graph(&self) -> bool {
        self.og_title.is_some() || self.og_description.is_some() || self.og_image.is_some()
    }

    fn has_twitter_card(&self) -> bool {
        self.twitter_card.is_some()
            || self.twitter_title.is_some()
            || self.twitter_description.is_some()
    }
}

fn extract_social_tags(html: &str) -> SocialTags {
    let document = Html::parse_document(html);
    SocialTags {
        og_title: content_of(&document, &OG_TITLE_SELECTOR),
        og_description: content_of(&document, &OG_DESCRIPTION_SELECTOR),
        og_image: content_of(&document, &OG_IMAGE_SELECTOR),
        twitter_card: content_of(&document, &TWITTER_CARD_SELECTOR),
        twitter_title: content_of(&document, &TWITTER_TITLE_SELECTOR),
        twitter_description: content_of(&document, &TWITTER_DESCRIPTION_SELECTOR),
    }
}

fn content_of(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn classify(open_graph: bool, twitter: bool) -> (CheckStatus, &'static str) {
    match (open_graph, twitter) {
        (true, true) => (
            CheckStatus::Ok,
            "Open Graph and Twitter Card tags are present.",
        ),
        (true, false) => (
            CheckStatus::Warning,
            "Open Graph tags present, but Twitter Card tags missing.",
        ),
        (false, true) => (
            CheckStatus::Warning,
            "Twitter Card tags present, but Open Graph tags missing.",
        ),
        (false, false) => (CheckStatus::Warning, "No social sharing tags found."),
    }
}
