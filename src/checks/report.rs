//! Normalized probe result types and the response envelope.
//!
//! Every probe produces exactly one [`CheckResult`] regardless of outcome.
//! The envelope types serialize to camelCase JSON with lowercase statuses
//! and kebab-case category tags, which downstream tooling relies on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::EnumIter as EnumIterMacro;

/// Classification of a single probe outcome.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro,
)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Property meets the recommended state.
    Ok,
    /// Present but sub-optimal, partially missing, or not fully verifiable.
    Warning,
    /// Absent, broken, or the probe could not complete.
    Error,
}

impl CheckStatus {
    /// Returns the lowercase wire tag for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed category set every probe is statically assigned to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro,
)]
#[serde(rename_all = "kebab-case")]
pub enum CheckCategory {
    /// Security headers, HTTPS, security.txt, redirect hygiene
    HttpSecurity,
    /// DNS records and mail-security posture
    NetworkDns,
    /// Hosting, WAF/CDN presence, server exposure, availability
    Infrastructure,
    /// robots.txt, sitemap, internal links, accessibility hints
    WebsiteStructure,
    /// HTML metadata, social tags, technology fingerprints
    MetadataStack,
    /// Response timing, compression, payload size
    Performance,
}

impl CheckCategory {
    /// Returns the kebab-case wire tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::HttpSecurity => "http-security",
            CheckCategory::NetworkDns => "network-dns",
            CheckCategory::Infrastructure => "infrastructure",
            CheckCategory::WebsiteStructure => "website-structure",
            CheckCategory::MetadataStack => "metadata-stack",
            CheckCategory::Performance => "performance",
        }
    }

    /// Returns a human-readable name for report output.
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckCategory::HttpSecurity => "HTTP & Security",
            CheckCategory::NetworkDns => "Network & DNS",
            CheckCategory::Infrastructure => "Infrastructure",
            CheckCategory::WebsiteStructure => "Website Structure",
            CheckCategory::MetadataStack => "Metadata & Stack",
            CheckCategory::Performance => "Performance",
        }
    }
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an attached recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, no urgency
    Info,
    /// Should be fixed
    Warning,
    /// Fix as soon as possible
    Critical,
}

/// Letter grade derived from the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90-100
    A,
    /// 75-89
    B,
    /// 60-74
    C,
    /// 40-59
    D,
    /// 0-39
    E,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        f.write_str(letter)
    }
}

/// External reference attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    /// Link text shown to the user
    pub label: String,
    /// Destination URL
    pub url: String,
}

/// Advisory remediation record attached to a degraded check.
///
/// Recommendations never affect scoring; they only explain how to fix
/// what the check observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable identifier, e.g. `missing-hsts`
    pub id: String,
    /// Short human-readable title
    pub title: String,
    /// What was observed
    pub description: String,
    /// Why it matters
    pub impact: String,
    /// Ordered remediation steps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub how_to: Vec<String>,
    /// Supporting documentation links
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ReferenceLink>,
    /// How urgent the fix is
    pub severity: Severity,
}

/// Normalized output of one probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Stable probe identifier, unique within the registry
    pub id: String,
    /// Human-readable probe name
    pub label: String,
    /// Category the probe is registered under
    pub category: CheckCategory,
    /// Outcome classification
    pub status: CheckStatus,
    /// One-line human-readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Probe-specific structured payload, opaque to the scorer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Wall-clock time this probe took, self-measured
    pub duration_ms: u64,
    /// Remediation advice when the outcome is degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

impl CheckResult {
    /// Creates a result with no summary, payload, or recommendation.
    pub fn new(
        id: &str,
        label: &str,
        category: CheckCategory,
        status: CheckStatus,
        duration_ms: u64,
    ) -> Self {
        CheckResult {
            id: id.to_owned(),
            label: label.to_owned(),
            category,
            status,
            summary: None,
            data: None,
            duration_ms,
            recommendation: None,
        }
    }

    /// Attaches a one-line summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attaches a structured payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attaches a recommendation.
    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }
}

/// Weighted score achieved within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// Category this score belongs to
    pub category: CheckCategory,
    /// Achieved points, `0..=max_score`
    pub score: u32,
    /// The category's fixed weight
    pub max_score: u32,
}

/// Overall score across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalScore {
    /// Sum of category scores, 0..=100
    pub score: u32,
    /// Letter grade derived from the score
    pub grade: Grade,
    /// Per-category breakdown, every category always present
    pub categories: Vec<CategoryScore>,
}

/// Complete outcome of one inspection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksResponse {
    /// Inspected URL, normalized
    pub url: String,
    /// Bare hostname of the inspected URL
    pub hostname: String,
    /// One result per registered probe, in registry order
    pub checks: Vec<CheckResult>,
    /// Wall-clock time from fan-out to last probe completion
    pub total_duration_ms: u64,
    /// Weighted score and grade
    pub score: GlobalScore,
}
