//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - HHL linear-system solving on a statevector simulator",
        style("hhl").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hhl-state  Operators, registers, gates and the statevector engine");
    println!("  hhl-core   Eigen analysis, planning, circuit assembly, verification");
    println!("  hhl-cli    Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
