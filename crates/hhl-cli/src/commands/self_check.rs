//! Self-check command implementation.

use anyhow::{Context, Result};
use console::style;

use hhl_core::check_rotate_ry;

/// Execute the self-check command.
pub fn execute(theta: f64) -> Result<()> {
    check_rotate_ry(theta).with_context(|| format!("Ry({theta}) self-check failed"))?;
    println!(
        "{} Ry({}) rotates |0> to ({:.4}, {:.4})",
        style("✓").green().bold(),
        theta,
        (theta / 2.0).cos(),
        (theta / 2.0).sin()
    );
    Ok(())
}
