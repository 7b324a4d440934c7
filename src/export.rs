//! Flat JSON document export of a completed inspection.
//!
//! The export is a trimmed, forward-compatible projection of the
//! response envelope: check payloads and recommendations are dropped,
//! what remains is the stable summary downstream tooling stores and
//! diffs. The document carries its own format version.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::checks::{CategoryScore, CheckCategory, CheckStatus, ChecksResponse, Grade};

/// Format version stamped into every exported document.
pub const EXPORT_VERSION: &str = "1.0.0";

/// One check row in the exported document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCheck {
    /// Stable check identifier.
    pub id: String,
    /// Human-readable check name.
    pub label: String,
    /// Category the check scored under.
    pub category: CheckCategory,
    /// Outcome classification.
    pub status: CheckStatus,
    /// One-line outcome, when the check produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Wall-clock time the check took.
    pub duration_ms: u64,
}

/// The flat inspection document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionDocument {
    /// Inspected URL, normalized.
    pub url: String,
    /// When the inspection ran, RFC 3339 with millisecond precision.
    pub scanned_at: String,
    /// Global score, 0..=100.
    pub score: u32,
    /// Letter grade for the global score.
    pub grade: Grade,
    /// Per-category breakdown.
    pub categories: Vec<CategoryScore>,
    /// One row per check, in registry order.
    pub checks: Vec<ExportCheck>,
    /// Document format version.
    pub version: String,
}

/// Projects a response envelope into the flat document, stamped with the
/// current time.
pub fn build_document(response: &ChecksResponse) -> InspectionDocument {
    build_document_at(response, Utc::now())
}

fn build_document_at(response: &ChecksResponse, scanned_at: DateTime<Utc>) -> InspectionDocument {
    InspectionDocument {
        url: response.url.clone(),
        scanned_at: scanned_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        score: response.score.score,
        grade: response.score.grade,
        categories: response.score.categories.clone(),
        checks: response
            .checks
            .iter()
            .map(|check| ExportCheck {
                id: check.id.clone(),
                label: check.label.clone(),
                category: check.category,
                status: check.status,
                summary: check.summary.clone(),
                duration_ms: check.duration_ms,
            })
            .collect(),
        version: EXPORT_VERSION.to_string(),
    }
}

/// Writes the document as pretty-printed JSON to `path`.
pub fn write_document(document: &InspectionDocument, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .context("Failed to serialize inspection document")?;
    writer.write_all(b"\n").context("Failed to write export file")?;
    writer.flush().context("Failed to flush export file")?;
    Ok(())
}
