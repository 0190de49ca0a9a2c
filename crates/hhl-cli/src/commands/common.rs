//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use hhl_core::{PipelineConfig, Scenario};

/// Load scenarios from a file, or the reference set when no file is given.
pub fn load_scenarios(path: Option<&str>) -> Result<Vec<Scenario>> {
    match path {
        Some(path) => {
            if !Path::new(path).exists() {
                anyhow::bail!("File not found: {path}");
            }
            Scenario::load_file(path).with_context(|| format!("Failed to load scenarios: {path}"))
        }
        None => Ok(Scenario::defaults()),
    }
}

/// Load the pipeline configuration (file, then `HHL_*` environment).
pub fn load_config(path: Option<&str>) -> Result<PipelineConfig> {
    PipelineConfig::load(path.map(Path::new)).context("Failed to load pipeline configuration")
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a labelled value.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Format a list of ratios to three decimals.
pub fn format_ratios(ratios: &[f64]) -> String {
    if ratios.is_empty() {
        return "-".into();
    }
    ratios
        .iter()
        .map(|r| format!("{r:.3}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a 2x2 matrix, including an imaginary part when present.
pub fn format_matrix(s: &Scenario) -> String {
    let entry = |r: usize, c: usize| {
        let re = s.a[r][c];
        match s.a_imag.map(|im| im[r][c]).filter(|im| *im != 0.0) {
            Some(im) => format!("{re:.3}{im:+.3}i"),
            None => format!("{re:.3}"),
        }
    };
    format!(
        "[[{}, {}], [{}, {}]]",
        entry(0, 0),
        entry(0, 1),
        entry(1, 0),
        entry(1, 1)
    )
}
