//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ParseArgs, PortfolioArgs};

/// Yieldline - bond identification and fixed income analytics
#[derive(Parser)]
#[command(name = "yieldline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a bond description and show how its maturity was read
    Parse(ParseArgs),

    /// Analyze one bond (yield, duration, convexity, spread)
    Analyze(AnalyzeArgs),

    /// Analyze a CSV portfolio and aggregate the results
    Portfolio(PortfolioArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
