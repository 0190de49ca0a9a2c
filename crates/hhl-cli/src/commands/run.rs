//! Run command implementation.
//!
//! Runs every scenario through the pipeline and prints the outcome. Any
//! failed scenario makes the command fail.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use hhl_core::{BatchEntry, BatchReport, TracingReporter, check_rotate_ry, run_batch};

use super::common::{format_ratios, load_config, load_scenarios, print_result, print_section};

/// Angle used for the rotation self-check before a run.
const SELF_CHECK_THETA: f64 = 1.2;

#[derive(Serialize)]
struct RunSummary<'a> {
    passed: bool,
    scenarios: &'a BatchReport,
}

/// Execute the run command.
pub fn execute(
    scenarios: Option<&str>,
    config: Option<&str>,
    format: &str,
    skip_self_check: bool,
) -> Result<()> {
    if !matches!(format, "table" | "json") {
        anyhow::bail!("Unknown format: '{format}'. Available: table, json");
    }

    let config = load_config(config)?;
    let scenarios = load_scenarios(scenarios)?;
    debug!(count = scenarios.len(), ?config, "loaded scenarios");

    if !skip_self_check {
        check_rotate_ry(SELF_CHECK_THETA).context("Rotation self-check failed")?;
    }

    let report = run_batch(&scenarios, &config, &mut TracingReporter);

    match format {
        "json" => {
            let summary = RunSummary {
                passed: report.all_passed(),
                scenarios: &report,
            };
            let json = serde_json::to_string_pretty(&summary)
                .context("JSON serialization failed")?;
            println!("{json}");
        }
        _ => {
            for entry in &report.entries {
                print_entry(entry);
            }
            println!();
        }
    }

    let failed = report.failures().count();
    info!(total = report.entries.len(), failed, "batch finished");
    if failed > 0 {
        anyhow::bail!("{failed} of {} scenario(s) failed", report.entries.len());
    }
    if format == "table" {
        println!(
            "{} All {} scenario(s) completed",
            style("✓").green().bold(),
            report.entries.len()
        );
    }
    Ok(())
}

fn print_entry(entry: &BatchEntry) {
    print_section(&entry.name);

    let outcome = match &entry.result {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("  {} {}", style("✗").red().bold(), e);
            return;
        }
    };

    let p = &outcome.parameters;
    print_result(
        "Eigenvalues",
        format!("{:.4}, {:.4}", outcome.eigenvalues[0], outcome.eigenvalues[1]),
    );
    print_result(
        "Scaled lambdas",
        format!("{:.1}, {:.1} (ratio {:.1})", p.lam[0], p.lam[1], p.ratio),
    );
    print_result("C", format!("{:.1}", p.c));
    print_result("t", format!("{:.4}", p.t));

    let r = &outcome.rotation;
    let correction = if r.corrected { " (overlap corrected)" } else { "" };
    print_result(
        "Rotation angles",
        format!("{:.4}, {:.4}{correction}", r.angles[0], r.angles[1]),
    );

    println!("  {}", style("Final state:").dim());
    for line in &outcome.state_lines {
        println!("    {}", style(line).cyan());
    }

    print_result("Classical solution^2 ratio", format_ratios(&outcome.classical));
    print_result("Quantum solution^2 ratio", format_ratios(&outcome.quantum));

    match outcome.verified {
        Some(true) => println!("  {} verified", style("✓").green().bold()),
        Some(false) => println!("  {} verification failed", style("✗").red().bold()),
        None => println!("  {} not verified", style("ℹ").blue()),
    }
}
