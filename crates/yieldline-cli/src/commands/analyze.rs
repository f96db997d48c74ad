//! Analyze command implementation.
//!
//! Resolves one bond from whatever identifies it and computes its analytics
//! at a clean price.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use yieldline_bonds::types::BondTerms;
use yieldline_engine::pipeline::{analyze_position, AnalyticsResult, PortfolioPosition};

use crate::cli::OutputFormat;
use crate::commands::{identifier, parse_date, validate_coupon, EngineArgs};
use crate::error::CliError;
use crate::output::{print_output, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// ISIN
    #[arg(short, long)]
    pub isin: Option<String>,

    /// Free-text description, e.g. "T 3 08/15/52"
    #[arg(short, long)]
    pub description: Option<String>,

    /// Issuer ticker
    #[arg(short, long)]
    pub ticker: Option<String>,

    /// Clean price per 100 face
    #[arg(short, long)]
    pub price: f64,

    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long, requires = "maturity")]
    pub coupon: Option<f64>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long, requires = "coupon")]
    pub maturity: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let ctx = args.engine.build_context()?;

    let id = identifier(
        args.isin.as_deref(),
        args.description.as_deref(),
        args.ticker.as_deref(),
    );
    let mut position = PortfolioPosition::new(id, args.price);
    if let Some(terms) = terms(args.coupon, args.maturity.as_deref())? {
        position = position.with_terms(terms);
    }

    let result = analyze_position(&ctx, &position)?;
    print_output(&metric_rows(&result), &result, format)
}

/// Coupon (in percent) and maturity as bond terms, when both were given.
pub fn terms(coupon: Option<f64>, maturity: Option<&str>) -> Result<Option<BondTerms>> {
    match (coupon, maturity) {
        (None, None) => Ok(None),
        (Some(coupon), Some(maturity)) => {
            let coupon = validate_coupon(coupon)?;
            let rate = Decimal::from_f64_retain(coupon / 100.0)
                .ok_or_else(|| anyhow::anyhow!("Invalid coupon"))?;
            Ok(Some(BondTerms::new(rate.round_dp(8), parse_date(maturity)?)))
        }
        _ => Err(CliError::IncompleteTerms.into()),
    }
}

fn metric_rows(result: &AnalyticsResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Bond", &result.identifier),
        KeyValue::new("Settlement", result.settlement_date),
        KeyValue::new("Maturity", result.maturity),
        KeyValue::from_percent("Coupon", result.coupon_rate),
        KeyValue::from_f64("Clean Price", result.clean_price, 4),
        KeyValue::from_f64("Accrued", result.accrued_interest, 4),
        KeyValue::from_f64("Dirty Price", result.dirty_price, 4),
        KeyValue::from_percent("YTM", result.ytm),
        KeyValue::from_f64("Modified Duration", result.duration, 4),
        KeyValue::from_f64("Macaulay Duration", result.macaulay_duration, 4),
        KeyValue::from_f64("Convexity", result.convexity, 4),
        KeyValue::from_f64("PVBP", result.pvbp, 6),
        KeyValue::from_bps("Z-Spread", result.spread),
    ];
    if let Some(oas) = &result.oas {
        rows.push(KeyValue::from_bps("OAS", Some(oas.oas)));
    }
    rows.push(KeyValue::new("Conventions", format!("{} ({})", result.source, result.confidence)));
    if result.degraded {
        rows.push(KeyValue::new("Degraded", "yes"));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_need_both_parts() {
        assert!(terms(None, None).unwrap().is_none());
        let t = terms(Some(4.0), Some("2030-01-15")).unwrap().unwrap();
        assert_eq!(t.coupon_rate, Decimal::new(4, 2));
        assert!(terms(Some(4.0), None).is_err());
        assert!(terms(Some(140.0), Some("2030-01-15")).is_err());
    }
}
