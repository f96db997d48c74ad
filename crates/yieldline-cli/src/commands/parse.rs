//! Parse command implementation.
//!
//! Shows how a description was read: pattern, coupon, maturity and what
//! settled the day/month order.

use anyhow::Result;
use clap::Args;

use yieldline_bonds::parser::DescriptionParser;
use yieldline_core::Date;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::output::{print_output, KeyValue};

/// Arguments for the parse command.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Bond description, e.g. "T 3 08/15/52"
    pub description: String,

    /// ISIN whose country prefix settles the day/month order
    #[arg(short, long)]
    pub isin: Option<String>,

    /// Reference date for two-digit years (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Execute the parse command.
pub fn execute(args: ParseArgs, format: OutputFormat) -> Result<()> {
    let as_of = match &args.as_of {
        Some(s) => parse_date(s)?,
        None => Date::today(),
    };

    let parsed = DescriptionParser::new(as_of).parse(&args.description, args.isin.as_deref())?;
    let raw = parsed.raw_maturity;

    let rows = vec![
        KeyValue::new("Issuer", &parsed.issuer),
        KeyValue::new("Pattern", format!("{:?}", parsed.pattern)),
        KeyValue::new("Coupon", format!("{}%", parsed.coupon)),
        KeyValue::new("Maturity", parsed.maturity),
        KeyValue::new("As Written", format!("{}/{}/{}", raw.first, raw.second, raw.year)),
        KeyValue::new("Date Format", format!("{:?}", parsed.date_format_used)),
        KeyValue::new("Decided By", format!("{:?}", parsed.format_source)),
        KeyValue::from_f64("Confidence", parsed.confidence, 2),
    ];

    print_output(&rows, &parsed, format)
}
