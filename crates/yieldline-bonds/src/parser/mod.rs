//! Free-text bond description parser.
//!
//! Extracts issuer, coupon and maturity from descriptions such as
//! `"T 3 08/15/52"`, `"AAPL 3.85 05/04/43"` or
//! `"Siemens AG, 2.5%, 15-Mar-2031"`.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use yieldline_bonds::parser::{DateFormat, DescriptionParser};
//! use yieldline_core::Date;
//!
//! let parser = DescriptionParser::new(Date::from_ymd(2025, 6, 30).unwrap());
//! let parsed = parser.parse("T 3 15/08/52", None).unwrap();
//! assert_eq!(parsed.maturity, Date::from_ymd(2052, 8, 15).unwrap());
//! assert_eq!(parsed.coupon, dec!(3));
//! assert_eq!(parsed.date_format_used, DateFormat::EU);
//! ```

mod dates;
mod patterns;

pub use dates::{disambiguate, expand_maturity, format_for_country, format_for_keywords, month_from_name};
pub use dates::{DateFormat, FormatSource};
pub use patterns::{parse_coupon, DescriptionPattern};

use regex::Captures;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yieldline_core::Date;

use crate::error::ParseError;
use crate::identifiers::Isin;

/// Maturity components exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDateComponents {
    /// First numeric field (`d1` of `d1/d2/yy`, or the day of `dd-Mon-yyyy`).
    pub first: u32,
    /// Second field (`d2`, or the month number of a named month).
    pub second: u32,
    /// Year as written (two or four digits).
    pub year: u32,
}

/// Result of parsing one description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDescription {
    /// Issuer text (`T`, `AAPL`, `Siemens AG`).
    pub issuer: String,
    /// Coupon in percent as written (`3.0` for 3%).
    pub coupon: Decimal,
    /// Resolved maturity date.
    pub maturity: Date,
    /// Maturity components before disambiguation.
    pub raw_maturity: RawDateComponents,
    /// Day/month order used.
    pub date_format_used: DateFormat,
    /// What decided the day/month order.
    pub format_source: FormatSource,
    /// Layout that matched.
    pub pattern: DescriptionPattern,
    /// Confidence in `[0, 1]` that the parse is right.
    pub confidence: f64,
}

impl ParsedDescription {
    /// Coupon as a decimal rate (`0.03` for 3%).
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon / Decimal::ONE_HUNDRED
    }
}

const DEFAULTED_FORMAT_PENALTY: f64 = 0.15;
const KEYWORD_FORMAT_PENALTY: f64 = 0.05;

/// Description parser anchored at an as-of date for two-digit year expansion.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionParser {
    as_of: Date,
}

impl Default for DescriptionParser {
    fn default() -> Self {
        Self::new(Date::today())
    }
}

impl DescriptionParser {
    /// Creates a parser expanding two-digit years relative to `as_of`.
    #[must_use]
    pub fn new(as_of: Date) -> Self {
        Self { as_of }
    }

    /// The as-of date.
    #[must_use]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Parses a description, using the ISIN (if any) to settle day/month order.
    pub fn parse(&self, description: &str, isin: Option<&str>) -> Result<ParsedDescription, ParseError> {
        let text = description.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Err(ParseError::Empty);
        }
        let isin = isin.and_then(Isin::lenient);
        let country = isin.as_ref().map(Isin::country_code);

        let mut last_error = None;
        for pattern in DescriptionPattern::all() {
            let Some(caps) = pattern.regex().captures(&text) else {
                continue;
            };
            match self.build(*pattern, &caps, country, &text) {
                Ok(parsed) => {
                    log::debug!(
                        "parsed '{text}' as {:?}: coupon {} maturity {} ({:?})",
                        pattern,
                        parsed.coupon,
                        parsed.maturity,
                        parsed.format_source
                    );
                    return Ok(parsed);
                }
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or(ParseError::NoPatternMatch { description: text }))
    }

    fn build(
        &self,
        pattern: DescriptionPattern,
        caps: &Captures<'_>,
        country: Option<&str>,
        text: &str,
    ) -> Result<ParsedDescription, ParseError> {
        let issuer = caps
            .name("issuer")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let coupon = parse_coupon(caps.name("coupon").map_or("", |m| m.as_str()))?;
        let year = number(caps, "year")?;
        let first = number(caps, "d1")?;

        let (raw, month, day, format, source) = if pattern == DescriptionPattern::International {
            let name = caps.name("month").map_or("", |m| m.as_str());
            let month = month_from_name(name)
                .ok_or_else(|| ParseError::invalid_date(name, "unknown month name"))?;
            let raw = RawDateComponents {
                first,
                second: month,
                year,
            };
            (raw, month, first, DateFormat::International, FormatSource::MonthName)
        } else {
            let second = number(caps, "d2")?;
            let (month, day, format, source) = disambiguate(first, second, country, text)?;
            let raw = RawDateComponents {
                first,
                second,
                year,
            };
            (raw, month, day, format, source)
        };

        let maturity = expand_maturity(year, month, day, self.as_of)?;

        let penalty = match source {
            FormatSource::Default => DEFAULTED_FORMAT_PENALTY,
            FormatSource::Keyword => KEYWORD_FORMAT_PENALTY,
            FormatSource::ComponentRange | FormatSource::IsinCountry | FormatSource::MonthName => 0.0,
        };

        Ok(ParsedDescription {
            issuer,
            coupon,
            maturity,
            raw_maturity: raw,
            date_format_used: format,
            format_source: source,
            pattern,
            confidence: (pattern.base_confidence() - penalty).clamp(0.0, 1.0),
        })
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Result<u32, ParseError> {
    let text = caps.name(name).map_or("", |m| m.as_str());
    text.parse()
        .map_err(|_| ParseError::invalid_date(text, format!("bad {name} field")))
}

/// Parses with today as the as-of date.
pub fn parse(description: &str, isin: Option<&str>) -> Result<ParsedDescription, ParseError> {
    DescriptionParser::default().parse(description, isin)
}
