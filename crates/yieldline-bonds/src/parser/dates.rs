//! Maturity date disambiguation.
//!
//! `08/05/52` is 5 August in New York and 8 May in London. The day/month
//! order is settled, in priority order, by component range, the ISIN
//! country prefix, region keywords in the description, and finally a US
//! default.

use serde::{Deserialize, Serialize};
use yieldline_core::Date;

use crate::error::ParseError;

/// Date layout a maturity was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// Month first (`MM/DD/YY`).
    US,
    /// Day first (`DD/MM/YY`).
    EU,
    /// Named month (`DD-Mon-YYYY`).
    International,
}

/// What decided the [`DateFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatSource {
    /// A component above 12 can only be a day.
    ComponentRange,
    /// ISIN country prefix.
    IsinCountry,
    /// Region or currency keyword in the description.
    Keyword,
    /// Nothing decided it; US order assumed.
    Default,
    /// The month was spelled out.
    MonthName,
}

const MONTH_FIRST_COUNTRIES: &[&str] = &["US", "CA", "MX"];
const DAY_FIRST_COUNTRIES: &[&str] = &[
    "GB", "DE", "FR", "IT", "ES", "NL", "BE", "AT", "IE", "FI", "PT", "LU", "CH", "SE", "NO", "DK",
    "XS", "AU", "NZ", "HK", "SG", "JP",
];
const MONTH_FIRST_KEYWORDS: &[&str] = &["UST", "US TREASURY"];
const DAY_FIRST_KEYWORDS: &[&str] = &["EUR", "GBP", "EUROBOND", "LONDON"];

/// Day/month order implied by an ISIN country prefix.
#[must_use]
pub fn format_for_country(country: &str) -> Option<DateFormat> {
    if MONTH_FIRST_COUNTRIES.contains(&country) {
        Some(DateFormat::US)
    } else if DAY_FIRST_COUNTRIES.contains(&country) {
        Some(DateFormat::EU)
    } else {
        None
    }
}

/// Day/month order implied by keywords in the description.
#[must_use]
pub fn format_for_keywords(description: &str) -> Option<DateFormat> {
    let words: Vec<String> = description
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_uppercase)
        .collect();
    let padded = format!(" {} ", words.join(" "));
    let has = |keywords: &[&str]| keywords.iter().any(|k| padded.contains(&format!(" {k} ")));

    if has(MONTH_FIRST_KEYWORDS) {
        Some(DateFormat::US)
    } else if has(DAY_FIRST_KEYWORDS) {
        Some(DateFormat::EU)
    } else {
        None
    }
}

/// Resolves `(first, second)` into `(month, day)`.
pub fn disambiguate(
    first: u32,
    second: u32,
    country: Option<&str>,
    description: &str,
) -> Result<(u32, u32, DateFormat, FormatSource), ParseError> {
    let raw = || format!("{first}/{second}");
    if first == 0 || second == 0 || first > 31 || second > 31 || (first > 12 && second > 12) {
        return Err(ParseError::invalid_date(raw(), "no month component"));
    }

    let (format, source) = if first > 12 {
        (DateFormat::EU, FormatSource::ComponentRange)
    } else if second > 12 {
        (DateFormat::US, FormatSource::ComponentRange)
    } else if let Some(format) = country.and_then(format_for_country) {
        (format, FormatSource::IsinCountry)
    } else if let Some(format) = format_for_keywords(description) {
        (format, FormatSource::Keyword)
    } else {
        (DateFormat::US, FormatSource::Default)
    };

    let (month, day) = match format {
        DateFormat::EU => (second, first),
        DateFormat::US | DateFormat::International => (first, second),
    };
    Ok((month, day, format, source))
}

/// Builds the maturity, expanding two-digit years into the future.
///
/// `yy` becomes `2000 + yy`, or `2100 + yy` when that would already lie
/// before `as_of`. Four-digit years are taken as written.
pub fn expand_maturity(year: u32, month: u32, day: u32, as_of: Date) -> Result<Date, ParseError> {
    let invalid = |reason: &str| ParseError::invalid_date(format!("{year}/{month}/{day}"), reason);
    let year = i32::try_from(year).map_err(|_| invalid("year out of range"))?;

    if year >= 1000 {
        return Date::from_ymd(year, month, day).map_err(|e| invalid(&e.to_string()));
    }
    if year >= 100 {
        return Err(invalid("year must have two or four digits"));
    }

    let naive = Date::from_ymd(2000 + year, month, day).map_err(|e| invalid(&e.to_string()))?;
    if naive >= as_of {
        return Ok(naive);
    }
    Date::from_ymd(2100 + year, month, day).map_err(|e| invalid(&e.to_string()))
}

/// Month number for an English month name or abbreviation.
#[must_use]
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
