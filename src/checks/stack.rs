//! Technology stack fingerprinting from markup and headers.

use std::sync::LazyLock;
use std::time::Instant;

use regex::{Regex, RegexBuilder};
use serde_json::json;

use crate::checks::failure_summary;
use crate::checks::{CheckCategory, CheckContext, CheckResult, CheckStatus};
use crate::config::{HEADER_SERVER, HEADER_X_POWERED_BY};
use crate::utils::elapsed_ms;

pub(crate) const ID: &str = "stack";
pub(crate) const LABEL: &str = "Technology Stack";
pub(crate) const CATEGORY: CheckCategory = CheckCategory::MetadataStack;

const FRAMEWORK_SIGNATURES: &[(&str, &str)] = &[
    ("Next.js", r"__next|_next/static|next\.js"),
    ("React", r"react|react-dom"),
    ("Vue.js", r"vue\.js|vue"),
    ("Angular", r"angular|ng-"),
    ("Svelte", r"svelte"),
    ("Gatsby", r"gatsby"),
];

const CMS_SIGNATURES: &[(&str, &str)] = &[
    ("WordPress", r"wp-content|wp-includes|wordpress"),
    ("Drupal", r"drupal|sites/all"),
    ("Joomla", r"joomla|components/com_"),
    ("Ghost", r"ghost"),
    ("Strapi", r"strapi"),
];

const ANALYTICS_SIGNATURES: &[(&str, &str)] = &[
    ("Google Analytics", r"google-analytics|ga\(|gtag"),
    ("Google Tag Manager", r"googletagmanager|gtm-"),
    ("Adobe Analytics", r"omniture|adobe.*analytics"),
    ("Mixpanel", r"mixpanel"),
    ("Segment", r"segment\.com|analytics\.js"),
];

const CDN_SIGNATURES: &[(&str, &str)] = &[
    ("Cloudflare", r"cloudflare|cf-ray"),
    ("Fastly", r"fastly"),
    ("Akamai", r"akamai"),
    ("AWS CloudFront", r"cloudfront|amazonaws"),
    ("Vercel", r"vercel|_vercel"),
    ("Netlify", r"netlify"),
];

static FRAMEWORKS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_signatures(FRAMEWORK_SIGNATURES));
static CMS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_signatures(CMS_SIGNATURES));
static ANALYTICS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_signatures(ANALYTICS_SIGNATURES));
static CDN: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_signatures(CDN_SIGNATURES));

fn compile_signatures(patterns: &[(&'static str, &'static str)]) -> Vec<(&'static str, Regex)> {
    patterns
        .iter()
        .filter_map(|(name, pattern)| {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(re) => Some((*name, re)),
                Err(e) => {
                    log::error!("Invalid stack signature for {name}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Fingerprints frameworks, CMS platforms, analytics scripts, and CDN
/// providers from the page markup and from the `server`/`x-powered-by`
/// headers. CDN providers are matched against headers first; the markup
/// is only a fallback when headers are silent.
pub(crate) async fn run(ctx: CheckContext) -> CheckResult {
    let start = Instant::now();

    let response = match ctx
        .client
        .get(ctx.url.clone())
        .timeout(ctx.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Stack fetch failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to detect technology stack."));
        }
    };

    let headers = response.headers();
    let header_haystack = format!(
        "{} {}",
        headers
            .get(HEADER_SERVER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
        headers
            .get(HEADER_X_POWERED_BY)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    );

    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            log::debug!("Stack body read failed for {}: {e}", ctx.url);
            return CheckResult::new(ID, LABEL, CATEGORY, CheckStatus::Error, elapsed_ms(start))
                .with_summary(failure_summary(&e, "Unable to detect technology stack."));
        }
    };

    let detections = detect(&html, &header_haystack);
    let (status, summary) = summarize(&detections);

    CheckResult::new(ID, LABEL, CATEGORY, status, elapsed_ms(start))
        .with_summary(summary)
        .with_data(json!({
            "frameworks": detections.frameworks,
            "cms": detections.cms,
            "analytics": detections.analytics,
            "cdn": detections.cdn,
            "detected": detections.all(),
        }))
}

#[derive(Default)]
struct StackDetections {
    frameworks: Vec<&'static str>,
    cms: Vec<&'static str>,
    analytics: Vec<&'static str>,
    cdn: Vec<&'static str>,
}

impl StackDetections {
    fn all(&self) -> Vec<&'static str> {
        let mut all = Vec::new();
        for name in self
            .frameworks
            .iter()
            .chain(&self.cms)
            .chain(&self.analytics)
            .chain(&self.cdn)
        {
            if !all.contains(name) {
                all.push(*name);
            }
        }
        all
    }
}

fn detect(html: &str, header_haystack: &str) -> StackDetections {
    let mut detections = StackDetections::default();

    for (name, re) in FRAMEWORKS.iter() {
        if re.is_match(html) || re.is_match(header_haystack) {
            detections.frameworks.push(*name);
        }
    }
    for (name, re) in CMS.iter() {
        if re.is_match(html) || re.is_match(header_haystack) {
            detections.cms.push(*name);
        }
    }
    for (name, re) in ANALYTICS.iter() {
        if re.is_match(html) {
            detections.analytics.push(*name);
        }
    }
    for (name, re) in CDN.iter() {
        if re.is_match(header_haystack) {
            detections.cdn.push(*name);
        }
    }
    if detections.cdn.is_empty() {
        for (name, re) in CDN.iter() {
            if re.is_match(html) {
                detections.cdn.push(*name);
            }
        }
    }

    detections
}

fn summarize(detections: &StackDetections) -> (CheckStatus, String) {
    if detections.all().is_empty() {
        return (
            CheckStatus::Warning,
            "No technologies identified.".to_string(),
        );
    }

    let mut parts = Vec::new();
    if !detections.frameworks.is_empty() {
        parts.push(format!("{} framework(s)", detections.frameworks.len()));
    }
    if !detections.cms.is_empty() {
        parts.push(format!("{} CMS", detections.cms.len()));
    }
    if !detections.analytics.is_empty() {
        parts.push(format!("{} analytics", detections.analytics.len()));
    }
    if !detections.cdn.is_empty() {
        parts.push(format!("{} CDN", detections.cdn.len()));
    }
    (CheckStatus::Ok, format!("Detected: {}.", parts.join(", ")))
}
