//! Description layouts and coupon notation.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Supported description layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptionPattern {
    /// `T 3 08/15/52`, `UST 4 1/4 11/15/34`.
    Treasury,
    /// `AAPL 3.85 05/04/43`.
    Corporate,
    /// `Siemens AG, 2.5%, 15-Mar-2031`.
    International,
}

impl DescriptionPattern {
    /// All patterns in matching order.
    #[must_use]
    pub fn all() -> &'static [DescriptionPattern] {
        &[
            DescriptionPattern::Treasury,
            DescriptionPattern::Corporate,
            DescriptionPattern::International,
        ]
    }

    /// Confidence of a match before any date-order penalty.
    #[must_use]
    pub fn base_confidence(&self) -> f64 {
        match self {
            DescriptionPattern::Treasury => 0.95,
            DescriptionPattern::Corporate => 0.85,
            DescriptionPattern::International => 0.90,
        }
    }

    pub(crate) fn regex(&self) -> &'static Regex {
        match self {
            DescriptionPattern::Treasury => treasury_regex(),
            DescriptionPattern::Corporate => corporate_regex(),
            DescriptionPattern::International => international_regex(),
        }
    }
}

// `4 1/4` before `4.25` before `1/2`; the regex engine backs off to the
// plain number when a mixed fraction would swallow the date.
const COUPON: &str = r"(?P<coupon>\d+\s+\d+/\d+|\d+(?:\.\d+)?|\.\d+|\d+/\d+)";
const SLASH_DATE: &str = r"(?P<d1>\d{1,2})[/-](?P<d2>\d{1,2})[/-](?P<year>\d{4}|\d{2})";
const TRAILER: &str = r"(?:\s+.*)?";

fn treasury_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&format!(
            r"(?i)^(?P<issuer>T|UST|US\s+TREASURY|TREASURY)\s+{COUPON}\s*%?\s+{SLASH_DATE}{TRAILER}$"
        ))
    })
}

fn corporate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&format!(
            r"(?i)^(?P<issuer>[A-Z][A-Z0-9&.'\-]*(?:\s+[A-Z][A-Z0-9&.'\-]*)*)\s+{COUPON}\s*%?\s+{SLASH_DATE}{TRAILER}$"
        ))
    })
}

fn international_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&format!(
            r"(?i)^(?P<issuer>[^,]+),\s*{COUPON}\s*%?\s*,\s*(?P<d1>\d{{1,2}})[-\s](?P<month>[A-Z]{{3,9}})[-\s](?P<year>\d{{4}}|\d{{2}}){TRAILER}$"
        ))
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("description patterns are constants")
}

/// Parses coupon notation into a percentage: `3`, `3.875`, `4 1/4`, `1/2`.
pub fn parse_coupon(text: &str) -> Result<Decimal, ParseError> {
    let text = text.trim();
    let invalid = |reason: &str| ParseError::invalid_coupon(text, reason);

    let value = match text.split_whitespace().collect::<Vec<_>>().as_slice() {
        [whole, fraction] => {
            let whole = Decimal::from_str(whole).map_err(|_| invalid("bad whole part"))?;
            whole + parse_fraction(fraction).ok_or_else(|| invalid("bad fraction"))?
        }
        [single] if single.contains('/') => {
            parse_fraction(single).ok_or_else(|| invalid("bad fraction"))?
        }
        [single] => Decimal::from_str(single).map_err(|_| invalid("not a number"))?,
        _ => return Err(invalid("unrecognised notation")),
    };

    if value > Decimal::from(50) {
        return Err(invalid("implausibly large coupon"));
    }
    Ok(value.normalize())
}

fn parse_fraction(text: &str) -> Option<Decimal> {
    let (num, den) = text.split_once('/')?;
    let num = Decimal::from_str(num).ok()?;
    let den = Decimal::from_str(den).ok()?;
    if den.is_zero() {
        return None;
    }
    num.checked_div(den)
}
