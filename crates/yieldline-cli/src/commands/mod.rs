//! CLI command implementations.

pub mod analyze;
pub mod parse;
pub mod portfolio;

pub use analyze::AnalyzeArgs;
pub use parse::ParseArgs;
pub use portfolio::PortfolioArgs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use yieldline_bonds::conventions::{
    ConventionResolver, InMemoryConventionStore, TickerConventionTable,
};
use yieldline_bonds::identifiers::Identifier;
use yieldline_core::Date;
use yieldline_curves::curves::{FlatCurve, ZeroCurve};
use yieldline_engine::config::EngineConfig;
use yieldline_engine::context::EngineContext;

use crate::error::{CliError, CliResult};

/// Engine inputs shared by the analysis commands.
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// Engine configuration file (TOML)
    #[arg(long, env = "YIELDLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trade date (YYYY-MM-DD). Defaults to the config value, then today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Flat benchmark zero rate (as percentage, e.g., 4.5 for 4.5%)
    #[arg(long, conflicts_with = "curve_file")]
    pub curve_rate: Option<f64>,

    /// Benchmark zero curve: JSON array of {"tenor", "rate"} pillars
    #[arg(long)]
    pub curve_file: Option<PathBuf>,

    /// Validated reference conventions (JSON)
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Ticker convention observations (JSON)
    #[arg(long)]
    pub tickers: Option<PathBuf>,
}

impl EngineArgs {
    /// Builds the engine context for one run.
    pub fn build_context(&self) -> Result<EngineContext> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(as_of) = &self.as_of {
            config = config.with_as_of(parse_date(as_of)?);
        }

        let ctx = EngineContext::new(config);
        let mut resolver = ConventionResolver::new(ctx.trade_date());
        if let Some(path) = &self.reference {
            let json = read(path, "reference conventions")?;
            let store = InMemoryConventionStore::from_json_str("reference", true, &json)
                .map_err(|e| CliError::reference_data("reference conventions", &display(path), e))?;
            debug!(records = store.len(), "reference conventions loaded");
            resolver = resolver.with_primary_store(Arc::new(store));
        }
        if let Some(path) = &self.tickers {
            let json = read(path, "ticker observations")?;
            let table = TickerConventionTable::from_json_str(&json)
                .map_err(|e| CliError::reference_data("ticker observations", &display(path), e))?;
            debug!(tickers = table.len(), "ticker statistics loaded");
            resolver = resolver.with_ticker_table(Arc::new(table));
        }
        let mut ctx = ctx.with_resolver(resolver);

        if let Some(rate) = self.curve_rate {
            let rate = validate_curve_rate(rate)?;
            ctx = ctx.with_curve(Arc::new(FlatCurve::new(rate / 100.0)));
        } else if let Some(path) = &self.curve_file {
            let json = read(path, "benchmark curve")?;
            let curve = ZeroCurve::from_json_str(&json)
                .map_err(|e| CliError::reference_data("benchmark curve", &display(path), e))?;
            ctx = ctx.with_curve(Arc::new(curve));
        }

        Ok(ctx)
    }
}

fn read(path: &Path, what: &'static str) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|e| CliError::reference_data(what, &display(path), e))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Builds an identifier from whichever parts were given.
pub fn identifier(isin: Option<&str>, description: Option<&str>, ticker: Option<&str>) -> Identifier {
    let mut id = Identifier::default();
    if let Some(isin) = isin {
        id = id.with_isin(isin);
    }
    if let Some(description) = description {
        id = id.with_description(description);
    }
    if let Some(ticker) = ticker {
        id = id.with_ticker(ticker);
    }
    id
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Validates a coupon rate.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a benchmark rate.
pub fn validate_curve_rate(rate: f64) -> CliResult<f64> {
    if !(-10.0..=100.0).contains(&rate) {
        return Err(CliError::InvalidCurveRate(rate));
    }
    Ok(rate)
}
