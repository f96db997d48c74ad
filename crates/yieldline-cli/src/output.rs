//! Output formatting utilities.

use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints rows as a table, or `json` as JSON.
///
/// Table rows are display strings; the JSON payload keeps full precision.
pub fn print_output<T: Tabled, J: Serialize + ?Sized>(
    rows: &[T],
    json: &J,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(json),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Formats a decimal rate as a percentage string.
pub fn format_percent(rate: f64) -> String {
    format!("{:.4}%", rate * 100.0)
}

/// Formats a spread already in basis points.
pub fn format_bps(bps: f64) -> String {
    format!("{bps:.2} bps")
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{title}");
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Creates a key-value pair with a fixed number of decimals.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{value:.precision$}"),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format_percent(rate))
    }

    /// Creates a key-value pair for an optional spread in basis points.
    pub fn from_bps(key: impl Into<String>, bps: Option<f64>) -> Self {
        Self::new(key, bps.map_or_else(|| "-".to_string(), format_bps))
    }
}
