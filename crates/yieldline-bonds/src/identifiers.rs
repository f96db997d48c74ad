//! Security identifiers.
//!
//! An [`Identifier`] is whatever the caller knows about a bond: an ISIN, a
//! free-text description, a ticker, or any combination. [`Isin`] adds
//! ISO 6166 validation on top of the raw string.

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// ISIN identifier with validation (ISO 6166).
///
/// Two-letter country prefix, nine alphanumeric characters, one Luhn check digit.
///
/// ```
/// use yieldline_bonds::identifiers::Isin;
///
/// let isin = Isin::new("US912810TL26").unwrap();
/// assert_eq!(isin.country_code(), "US");
/// assert_eq!(isin.nsin(), "912810TL2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isin(String);

impl Isin {
    /// Creates a new validated ISIN.
    pub fn new(value: &str) -> Result<Self, IdentifierError> {
        let value = value.trim().to_uppercase();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Creates an ISIN without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Accepts a structurally valid ISIN even when its check digit is wrong.
    ///
    /// The check-digit failure is logged; the country prefix is still useful
    /// for date disambiguation and convention defaults. Returns `None` when
    /// the value is not ISIN-shaped at all.
    #[must_use]
    pub fn lenient(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        match Self::validate(&upper) {
            Ok(()) => Some(Self(upper)),
            Err(IdentifierError::InvalidCheckDigit { .. }) => {
                log::warn!("ISIN {upper} fails its check digit, using it for its country prefix only");
                Some(Self(upper))
            }
            Err(_) => None,
        }
    }

    /// Validates an upper-case ISIN string.
    pub fn validate(value: &str) -> Result<(), IdentifierError> {
        if value.len() != 12 {
            return Err(IdentifierError::InvalidLength {
                actual: value.len(),
            });
        }

        let bytes = value.as_bytes();
        if !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
            return Err(IdentifierError::InvalidFormat {
                reason: "country code must be two uppercase letters".to_string(),
            });
        }
        if let Some(pos) = bytes[2..]
            .iter()
            .position(|b| !(b.is_ascii_digit() || b.is_ascii_uppercase()))
        {
            return Err(IdentifierError::InvalidFormat {
                reason: format!("unexpected character at position {}", pos + 2),
            });
        }
        if !bytes[11].is_ascii_digit() {
            return Err(IdentifierError::InvalidFormat {
                reason: "check digit must be numeric".to_string(),
            });
        }

        if !Self::verify_check_digit(value) {
            return Err(IdentifierError::InvalidCheckDigit {
                value: value.to_string(),
            });
        }

        Ok(())
    }

    /// Luhn over the digit expansion (A=10 .. Z=35), doubling from the right.
    fn verify_check_digit(isin: &str) -> bool {
        let mut digits = Vec::with_capacity(24);
        for c in isin.chars() {
            if let Some(d) = c.to_digit(10) {
                digits.push(d);
            } else if c.is_ascii_uppercase() {
                let v = (c as u32) - ('A' as u32) + 10;
                digits.push(v / 10);
                digits.push(v % 10);
            } else {
                return false;
            }
        }

        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(pos, &d)| {
                if pos % 2 == 1 {
                    let doubled = d * 2;
                    doubled / 10 + doubled % 10
                } else {
                    d
                }
            })
            .sum();

        sum % 10 == 0
    }

    /// Two-letter country (or `XS` supranational) prefix.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// National security identifier (characters 3-11).
    #[must_use]
    pub fn nsin(&self) -> &str {
        &self.0[2..11]
    }

    /// Full ISIN string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for US Treasury issues (`US912...`).
    #[must_use]
    pub fn is_us_treasury(&self) -> bool {
        self.0.starts_with("US912")
    }

    /// True for the US government-sponsored agency prefixes (FHLB, FFCB, FNMA, FHLMC).
    #[must_use]
    pub fn is_us_agency(&self) -> bool {
        ["US3130", "US3133", "US3135", "US3137"]
            .iter()
            .any(|prefix| self.0.starts_with(prefix))
    }
}

impl std::fmt::Display for Isin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Isin {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// What the caller knows about a bond.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// ISIN, possibly with a bad check digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    /// Free-text description such as `"T 3 08/15/52"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Issuer ticker such as `"AAPL"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

impl Identifier {
    /// Identifier carrying only an ISIN.
    #[must_use]
    pub fn from_isin(isin: impl Into<String>) -> Self {
        Self::default().with_isin(isin)
    }

    /// Identifier carrying only a description.
    #[must_use]
    pub fn from_description(description: impl Into<String>) -> Self {
        Self::default().with_description(description)
    }

    /// Sets the ISIN. Blank values are dropped.
    #[must_use]
    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = non_blank(isin.into());
        self
    }

    /// Sets the description. Blank values are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the ticker. Blank values are dropped.
    #[must_use]
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = non_blank(ticker.into());
        self
    }

    /// True when nothing usable was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.isin.is_none() && self.description.is_none() && self.ticker.is_none()
    }

    /// The ISIN, leniently parsed.
    #[must_use]
    pub fn parsed_isin(&self) -> Option<Isin> {
        self.isin.as_deref().and_then(Isin::lenient)
    }

    /// Ticker given explicitly, else the leading word of the description.
    #[must_use]
    pub fn ticker_hint(&self) -> Option<String> {
        if let Some(ticker) = &self.ticker {
            return Some(ticker.trim().to_uppercase());
        }
        let first = self.description.as_deref()?.split_whitespace().next()?;
        let token = first.trim_end_matches(',');
        let looks_like_ticker = !token.is_empty()
            && token.len() <= 6
            && token.chars().all(|c| c.is_ascii_alphabetic());
        looks_like_ticker.then(|| token.to_uppercase())
    }

    /// Key used in logs and error records: ISIN, then ticker, then description.
    #[must_use]
    pub fn key(&self) -> String {
        self.isin
            .as_deref()
            .or(self.ticker.as_deref())
            .or(self.description.as_deref())
            .unwrap_or("<empty>")
            .trim()
            .to_uppercase()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_isins() {
        for isin in [
            "US0378331005",
            "US912810TL26",
            "US912810QE10",
            "XS1234567896",
            "GB00B03MLX29",
            "DE0001135481",
            "US3135G0K368",
            "CA135087K940",
        ] {
            assert!(Isin::new(isin).is_ok(), "{isin} should validate");
        }
    }

    #[test]
    fn test_invalid_isins() {
        assert!(matches!(
            Isin::new("US912810TL2"),
            Err(IdentifierError::InvalidLength { actual: 11 })
        ));
        assert!(matches!(
            Isin::new("1S912810TL26"),
            Err(IdentifierError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Isin::new("US912810TL27"),
            Err(IdentifierError::InvalidCheckDigit { .. })
        ));
    }

    #[test]
    fn test_lenient_keeps_country_on_bad_check_digit() {
        let isin = Isin::lenient("us912810tl27").unwrap();
        assert_eq!(isin.country_code(), "US");
        assert!(isin.is_us_treasury());
        assert!(Isin::lenient("not an isin").is_none());
    }

    #[test]
    fn test_agency_prefix() {
        assert!(Isin::new("US3135G0K368").unwrap().is_us_agency());
        assert!(!Isin::new("US0378331005").unwrap().is_us_agency());
    }

    #[test]
    fn test_identifier_builders() {
        let id = Identifier::from_description("  ").with_ticker("aapl");
        assert!(id.description.is_none());
        assert_eq!(id.ticker_hint().as_deref(), Some("AAPL"));
        assert_eq!(id.key(), "AAPL");
        assert!(!id.is_empty());
        assert!(Identifier::default().is_empty());
    }

    #[test]
    fn test_ticker_hint_from_description() {
        let id = Identifier::from_description("IBM 4.5 05/15/34");
        assert_eq!(id.ticker_hint().as_deref(), Some("IBM"));

        let id = Identifier::from_description("4.5 05/15/34");
        assert!(id.ticker_hint().is_none());
    }
}
