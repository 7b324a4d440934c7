//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_inspector` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use site_inspector::export::{build_document, write_document};
use site_inspector::initialization::{init_crypto_provider, init_logger_with, init_resources};
use site_inspector::{inspect_site, CheckStatus, ChecksResponse, Config, Grade};

/// Caller identity the binary charges its rate-limit window under.
const CLI_CALLER_ID: &str = "cli";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env (if it exists). Try the current
    // directory first, then next to the executable.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let resources = init_resources(&config).context("Failed to initialize resources")?;

    let timeout = Duration::from_millis(config.timeout_ms);
    let response = match inspect_site(&resources, &config.url, CLI_CALLER_ID, timeout).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("site_inspector error: {e}");
            process::exit(1);
        }
    };

    if let Some(path) = &config.output {
        let document = build_document(&response);
        write_document(&document, path)?;
        println!("Report written to {}", path.display());
    } else if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("Failed to serialize report")?
        );
    } else {
        print_summary(&response);
    }

    Ok(())
}

/// Prints the human-readable report: global score, then every check
/// grouped under its category.
fn print_summary(response: &ChecksResponse) {
    let score = &response.score;
    let grade = match score.grade {
        Grade::A | Grade::B => score.grade.to_string().green().bold(),
        Grade::C => score.grade.to_string().yellow().bold(),
        Grade::D | Grade::E => score.grade.to_string().red().bold(),
    };

    println!();
    println!("{} {}", "Inspection report for".bold(), response.url);
    println!(
        "Score: {}/100 (grade {grade}) in {}ms",
        score.score, response.total_duration_ms
    );
    println!();

    for category in &score.categories {
        println!(
            "  {} {}/{}",
            format!("{}:", category.category.display_name()).bold(),
            category.score,
            category.max_score
        );
        let members = response
            .checks
            .iter()
            .filter(|check| check.category == category.category);
        for check in members {
            let icon = match check.status {
                CheckStatus::Ok => "✔".green(),
                CheckStatus::Warning => "⚠".yellow(),
                CheckStatus::Error => "✖".red(),
            };
            match check.summary.as_deref() {
                Some(summary) => println!("    {icon} {}: {summary}", check.label),
                None => println!("    {icon} {}", check.label),
            }
        }
        println!();
    }
}
