//! List command implementation.

use anyhow::Result;
use console::style;

use super::common::{format_matrix, load_scenarios};

/// Execute the list command.
pub fn execute(scenarios: Option<&str>) -> Result<()> {
    let scenarios = load_scenarios(scenarios)?;

    println!("{}", style("Scenarios:").bold());
    println!();

    for s in &scenarios {
        let verify = if s.verify {
            style("verify").green()
        } else {
            style("explore").dim()
        };
        let clock = s
            .clock_bits
            .map_or_else(|| "default".to_string(), |k| k.to_string());
        println!("  {} [{}]", style(&s.name).cyan().bold(), verify);
        println!("    A = {}", format_matrix(s));
        println!("    b = ({}, {})", s.b[0], s.b[1]);
        println!("    clock bits: {clock}");
    }

    Ok(())
}
