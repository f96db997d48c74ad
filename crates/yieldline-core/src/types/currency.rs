//! ISO 4217 currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Currencies the convention tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
    /// Hong Kong Dollar
    HKD,
    /// Singapore Dollar
    SGD,
    /// Mexican Peso
    MXN,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::HKD => "HKD",
            Currency::SGD => "SGD",
            Currency::MXN => "MXN",
        }
    }

    /// Best-effort currency for an ISIN country prefix.
    ///
    /// Supranational (`XS`) and euro-area prefixes map to EUR.
    #[must_use]
    pub fn for_country(country: &str) -> Self {
        match country {
            "US" => Currency::USD,
            "GB" => Currency::GBP,
            "JP" => Currency::JPY,
            "CH" => Currency::CHF,
            "CA" => Currency::CAD,
            "AU" => Currency::AUD,
            "HK" => Currency::HKD,
            "SG" => Currency::SGD,
            "MX" => Currency::MXN,
            "DE" | "FR" | "IT" | "ES" | "NL" | "BE" | "AT" | "IE" | "FI" | "PT" | "LU" | "XS" => {
                Currency::EUR
            }
            _ => Currency::USD,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "HKD" => Ok(Currency::HKD),
            "SGD" => Ok(Currency::SGD),
            "MXN" => Ok(Currency::MXN),
            _ => Err(CoreError::unknown_convention("currency", s)),
        }
    }
}
