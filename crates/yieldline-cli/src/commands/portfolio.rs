//! Portfolio command implementation.
//!
//! Reads positions from CSV, analyzes them in parallel and prints one row
//! per position followed by the portfolio summary.
//!
//! Expected columns (all but `price` optional):
//!
//! ```text
//! isin,description,ticker,price,weight,coupon,maturity
//! US912810TG31,T 3 15/08/52,,71.66,60,,
//! ,AAPL 3.85 05/04/43,AAPL,88.2,40,,
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tabled::Tabled;

use yieldline_engine::pipeline::PortfolioPosition;
use yieldline_engine::portfolio::{analyze_portfolio, PortfolioAnalytics, PositionOutcome};

use crate::cli::OutputFormat;
use crate::commands::analyze::terms;
use crate::commands::{identifier, EngineArgs};
use crate::error::CliError;
use crate::output::{format_bps, format_percent, print_header, print_json, print_table, KeyValue};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Positions CSV file, or "-" for stdin
    pub input: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// One CSV row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PositionRow {
    isin: Option<String>,
    description: Option<String>,
    ticker: Option<String>,
    price: Option<f64>,
    weight: Option<f64>,
    coupon: Option<f64>,
    maturity: Option<String>,
}

impl PositionRow {
    fn into_position(self, row: usize) -> Result<PortfolioPosition> {
        let terms = terms(self.coupon, self.maturity.as_deref()).map_err(|e| CliError::InvalidRow {
            row,
            reason: e.to_string(),
        })?;
        Ok(PortfolioPosition {
            identifier: identifier(
                self.isin.as_deref(),
                self.description.as_deref(),
                self.ticker.as_deref(),
            ),
            price: self.price,
            weight: self.weight,
            terms,
        })
    }
}

/// Table row for one position.
#[derive(Debug, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Bond")]
    bond: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
    #[tabled(rename = "Z-Spread")]
    spread: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&PositionOutcome> for OutcomeRow {
    fn from(outcome: &PositionOutcome) -> Self {
        match outcome {
            PositionOutcome::Success {
                index,
                weight,
                result,
            } => Self {
                index: *index,
                bond: result.identifier.clone(),
                weight: format!("{weight:.2}"),
                ytm: format_percent(result.ytm),
                duration: format!("{:.4}", result.duration),
                convexity: format!("{:.4}", result.convexity),
                spread: result.spread.map_or_else(|| "-".to_string(), format_bps),
                status: if result.degraded { "degraded" } else { "ok" }.to_string(),
            },
            PositionOutcome::Failure(record) => Self {
                index: record.index,
                bond: record.identifier.clone(),
                weight: "-".into(),
                ytm: "-".into(),
                duration: "-".into(),
                convexity: "-".into(),
                spread: "-".into(),
                status: format!("{}: {}", record.kind, record.message),
            },
        }
    }
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, format: OutputFormat) -> Result<()> {
    let ctx = args.engine.build_context()?;
    let positions = if args.input.as_os_str() == "-" {
        read_positions(std::io::stdin())?
    } else {
        let file = std::fs::File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        read_positions(file)?
    };

    let report = analyze_portfolio(Arc::new(ctx), positions)?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            let rows: Vec<OutcomeRow> = report.positions.iter().map(OutcomeRow::from).collect();
            print_table(&rows)?;
            print_header("Portfolio");
            print_table(&summary_rows(&report.summary))
        }
    }
}

/// Reads positions from CSV with a header row.
fn read_positions<R: Read>(reader: R) -> Result<Vec<PortfolioPosition>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut positions = Vec::new();
    for (i, row) in rdr.deserialize::<PositionRow>().enumerate() {
        let row = row.map_err(|e| CliError::InvalidRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        positions.push(row.into_position(i + 1)?);
    }
    Ok(positions)
}

fn summary_rows(summary: &PortfolioAnalytics) -> Vec<KeyValue> {
    let optional = |value: Option<f64>, f: fn(f64) -> String| value.map_or_else(|| "-".to_string(), f);
    let mut rows = vec![
        KeyValue::new(
            "Positions",
            format!("{} ({} ok, {} failed)", summary.total_positions, summary.successful, summary.failed),
        ),
        KeyValue::new("Success Rate", format_percent(summary.success_rate)),
        KeyValue::new("Weighted YTM", optional(summary.weighted_ytm, format_percent)),
        KeyValue::new("Weighted Duration", optional(summary.weighted_duration, |d| format!("{d:.4}"))),
        KeyValue::new("Weighted Convexity", optional(summary.weighted_convexity, |c| format!("{c:.4}"))),
        KeyValue::new("Weighted Z-Spread", optional(summary.weighted_spread, format_bps)),
        KeyValue::from_f64("Total Weight", summary.total_weight, 2),
    ];
    if summary.weight_warning {
        rows.push(KeyValue::new("Warning", "weights do not sum to 100"));
    }
    if summary.degraded > 0 {
        rows.push(KeyValue::new("Degraded", summary.degraded));
    }
    if summary.timed_out {
        rows.push(KeyValue::new("Timed Out", "yes"));
    }
    rows
}
