//! Export document construction and on-disk shape.

use std::fs;

use site_inspector::checks::{
    CategoryScore, CheckCategory, CheckResult, CheckStatus, ChecksResponse, GlobalScore, Grade,
};
use site_inspector::export::{build_document, write_document, EXPORT_VERSION};

fn sample_response() -> ChecksResponse {
    let checks = vec![
        CheckResult::new(
            "headers",
            "Security Headers",
            CheckCategory::HttpSecurity,
            CheckStatus::Warning,
            120,
        )
        .with_summary("2 of 6 recommended security headers present."),
        CheckResult::new(
            "uptime",
            "Availability",
            CheckCategory::Performance,
            CheckStatus::Ok,
            45,
        )
        .with_summary("Site is reachable (HTTP 200, 45ms)."),
    ];

    ChecksResponse {
        url: "https://example.com/".to_string(),
        hostname: "example.com".to_string(),
        checks,
        total_duration_ms: 321,
        score: GlobalScore {
            score: 61,
            grade: Grade::C,
            categories: vec![
                CategoryScore {
                    category: CheckCategory::HttpSecurity,
                    score: 15,
                    max_score: 25,
                },
                CategoryScore {
                    category: CheckCategory::Performance,
                    score: 10,
                    max_score: 10,
                },
            ],
        },
    }
}

#[test]
fn document_carries_the_response_and_format_version() {
    let response = sample_response();
    let document = build_document(&response);

    assert_eq!(document.version, EXPORT_VERSION);
    assert_eq!(document.url, response.url);
    assert_eq!(document.score, 61);
    assert_eq!(document.grade, Grade::C);
    assert_eq!(document.checks.len(), response.checks.len());
    assert_eq!(document.categories, response.score.categories);
    // RFC 3339 with millisecond precision in UTC.
    assert!(document.scanned_at.ends_with('Z'));
    assert!(document.scanned_at.contains('.'));
}

#[test]
fn document_serializes_camel_case_wire_names() {
    let document = build_document(&sample_response());
    let json = serde_json::to_value(&document).unwrap();

    assert!(json.get("scannedAt").is_some());
    assert_eq!(json["checks"][0]["durationMs"], 120);
    assert_eq!(json["checks"][0]["status"], "warning");
    assert_eq!(json["checks"][0]["category"], "http-security");
    assert_eq!(json["categories"][1]["maxScore"], 10);
    assert_eq!(json["grade"], "C");
    assert_eq!(json["version"], "1.0.0");
}

#[test]
fn written_file_round_trips_through_serde() {
    let document = build_document(&sample_response());
    let path = std::env::temp_dir().join(format!("inspector-export-{}.json", std::process::id()));

    write_document(&document, &path).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(raw.ends_with('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["url"], "https://example.com/");
    assert_eq!(parsed["checks"][1]["id"], "uptime");
    assert_eq!(parsed["score"], 61);
}
