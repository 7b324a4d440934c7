//! Weighted scoring and grade banding.
//!
//! Category weights are fixed, sum to exactly 100, and live here as the
//! single source the scorer reads. A category's score is the average of
//! its checks' status multipliers times its weight, rounded to the
//! nearest point. Categories without results score zero but stay listed
//! in the breakdown, so the response shape never depends on which checks
//! ran.

use strum::IntoEnumIterator;

use crate::checks::{CategoryScore, CheckCategory, CheckResult, CheckStatus, GlobalScore, Grade};

/// Fixed weight of a category.
pub const fn category_weight(category: CheckCategory) -> u32 {
    match category {
        CheckCategory::HttpSecurity => 25,
        CheckCategory::NetworkDns => 20,
        CheckCategory::Infrastructure => 20,
        CheckCategory::WebsiteStructure => 15,
        CheckCategory::MetadataStack => 10,
        CheckCategory::Performance => 10,
    }
}

/// Contribution multiplier of one check outcome.
pub const fn status_multiplier(status: CheckStatus) -> f64 {
    match status {
        CheckStatus::Ok => 1.0,
        CheckStatus::Warning => 0.6,
        CheckStatus::Error => 0.0,
    }
}

/// Maps a global score to its letter grade.
pub fn score_to_grade(score: u32) -> Grade {
    if score >= 90 {
        Grade::A
    } else if score >= 75 {
        Grade::B
    } else if score >= 60 {
        Grade::C
    } else if score >= 40 {
        Grade::D
    } else {
        Grade::E
    }
}

/// Aggregates check results into per-category scores and the global
/// score. Pure and deterministic: the same results always produce the
/// same score.
pub fn calculate_global_score(results: &[CheckResult]) -> GlobalScore {
    let categories: Vec<CategoryScore> = CheckCategory::iter()
        .map(|category| score_category(category, results))
        .collect();
    let score = categories.iter().map(|c| c.score).sum();
    GlobalScore {
        score,
        grade: score_to_grade(score),
        categories,
    }
}

fn score_category(category: CheckCategory, results: &[CheckResult]) -> CategoryScore {
    let max_score = category_weight(category);
    let multipliers: Vec<f64> = results
        .iter()
        .filter(|r| r.category == category)
        .map(|r| status_multiplier(r.status))
        .collect();
    let score = if multipliers.is_empty() {
        0
    } else {
        let average = multipliers.iter().sum::<f64>() / multipliers.len() as f64;
        (average * f64::from(max_score)).round() as u32
    };
    CategoryScore {
        category,
        score,
        max_score,
    }
}
