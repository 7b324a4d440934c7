//! Concurrent fan-out and ordered collection of the check battery.

use std::time::Instant;

use crate::checks::{
    registry, CheckContext, CheckResult, CheckStatus, ChecksResponse, RegisteredCheck,
};
use crate::scoring::calculate_global_score;
use crate::utils::elapsed_ms;

/// Runs every registered check against `ctx` and assembles the scored
/// response envelope.
///
/// Checks run concurrently, each in its own task so a panic in one cannot
/// take down the run; a panicked check is substituted with a synthetic
/// error result. Results are collected in registry order regardless of
/// completion order, and the total duration spans fan-out to the last
/// completion.
pub async fn run_checks(ctx: &CheckContext) -> ChecksResponse {
    run_registered(registry(), ctx).await
}

async fn run_registered(checks: &'static [RegisteredCheck], ctx: &CheckContext) -> ChecksResponse {
    let start = Instant::now();

    let mut handles = Vec::with_capacity(checks.len());
    for check in checks {
        handles.push((check, tokio::spawn((check.entry)(ctx.clone()))));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (check, handle) in handles {
        match handle.await {
            Ok(result) => {
                log::debug!(
                    "Check '{}' finished in {}ms ({})",
                    result.id,
                    result.duration_ms,
                    result.status.as_str()
                );
                results.push(result);
            }
            Err(e) => {
                log::error!("Check '{}' aborted: {e}", check.id);
                results.push(
                    CheckResult::new(check.id, check.label, check.category, CheckStatus::Error, 0)
                        .with_summary("Check failed unexpectedly."),
                );
            }
        }
    }

    let total_duration_ms = elapsed_ms(start);
    let score = calculate_global_score(&results);
    log::info!(
        "Inspection of {} finished in {total_duration_ms}ms: {}/100 (grade {})",
        ctx.hostname,
        score.score,
        score.grade
    );

    ChecksResponse {
        url: ctx.url_str().to_string(),
        hostname: ctx.hostname.clone(),
        checks: results,
        total_duration_ms,
        score,
    }
}
