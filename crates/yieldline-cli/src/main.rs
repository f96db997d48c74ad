//! Yieldline CLI - bond identification and analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Parse a description
//! yieldline parse "T 3 15/08/52"
//!
//! # Analyze one bond at a clean price
//! yieldline analyze --description "T 3 15/08/52" --price 71.66 --curve-rate 4.5
//!
//! # Analyze a CSV portfolio
//! yieldline --format json portfolio positions.csv --config yieldline.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let format = cli.format;
    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, format)?,
        Commands::Analyze(args) => commands::analyze::execute(args, format)?,
        Commands::Portfolio(args) => commands::portfolio::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays clean.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
