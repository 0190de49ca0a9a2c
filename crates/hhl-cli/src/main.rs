//! HHL Command-Line Interface
//!
//! Runs the HHL linear-system simulation over a set of 2x2 scenarios and
//! reports the classical and quantum solution ratios.
//!
//! ```text
//! hhl run                       # the four reference scenarios
//! hhl run --scenarios s.yaml    # scenarios from a file
//! hhl list                      # show the scenarios without running them
//! hhl self-check --theta 1.2    # check the Ry rotation primitive
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{list, run, self_check, version};

/// HHL - quantum linear-system solving on a statevector simulator
#[derive(Parser)]
#[command(name = "hhl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenarios through the HHL pipeline
    Run {
        /// Scenario file (YAML or JSON); the reference scenarios if omitted
        #[arg(short, long)]
        scenarios: Option<String>,

        /// Pipeline configuration file (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Skip the rotation self-check before running
        #[arg(long)]
        skip_self_check: bool,
    },

    /// List scenarios without running them
    List {
        /// Scenario file (YAML or JSON); the reference scenarios if omitted
        #[arg(short, long)]
        scenarios: Option<String>,
    },

    /// Check the Ry rotation primitive
    SelfCheck {
        /// Rotation angle in radians
        #[arg(short, long, default_value = "1.2", allow_negative_numbers = true)]
        theta: f64,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins when set
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            scenarios,
            config,
            format,
            skip_self_check,
        } => run::execute(
            scenarios.as_deref(),
            config.as_deref(),
            &format,
            skip_self_check,
        ),

        Commands::List { scenarios } => list::execute(scenarios.as_deref()),

        Commands::SelfCheck { theta } => self_check::execute(theta),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
