//! Day count conventions.
//!
//! Each convention is its own strategy type implementing [`DayCount`]. Callers
//! normally hold a [`DayCountConvention`], the closed vocabulary that is
//! serialized on the wire, and dispatch through it:
//!
//! - [`Thirty360BondBasis`]: `Thirty360_BondBasis`
//! - [`ActActIsda`]: `ActualActual_ISDA`
//! - [`ActActBond`]: `ActualActual_Bond`
//! - [`ActActIsma`]: `ActualActual_ISMA`
//! - [`Act360`]: `Actual360`
//! - [`Act365Fixed`]: `Actual365Fixed`
//!
//! ```rust
//! use yieldline_core::daycounts::DayCountConvention;
//! use yieldline_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 5, 31).unwrap();
//! let end = Date::from_ymd(2025, 6, 30).unwrap();
//! assert_eq!(DayCountConvention::Thirty360BondBasis.day_count(start, end), 30);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::{ActActBond, ActActIsda, ActActIsma};
pub use thirty360::Thirty360BondBasis;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// A day count strategy.
///
/// Implementations must be thread-safe (`Send + Sync`) since a single instance
/// is shared by every worker in a batch.
pub trait DayCount: Send + Sync {
    /// Human-readable convention name.
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under the convention.
    ///
    /// Actual conventions return calendar days; 30/360 applies the 30-day month.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction of `[start, end]` inside the coupon period
    /// `[period_start, period_end]`.
    ///
    /// Only period-based conventions look at the reference period.
    fn year_fraction_in_period(
        &self,
        start: Date,
        end: Date,
        _period_start: Date,
        _period_end: Date,
        _periods_per_year: u32,
    ) -> Decimal {
        self.year_fraction(start, end)
    }
}

/// The supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 30/360 Bond Basis. US corporates, agencies, municipals.
    #[serde(rename = "Thirty360_BondBasis")]
    Thirty360BondBasis,

    /// Actual/Actual ISDA, split by calendar year.
    #[serde(rename = "ActualActual_ISDA")]
    ActualActualIsda,

    /// Actual/Actual Bond. US Treasuries.
    #[serde(rename = "ActualActual_Bond")]
    ActualActualBond,

    /// Actual/Actual ISMA, period based. Eurobonds and most sovereigns.
    #[serde(rename = "ActualActual_ISMA")]
    ActualActualIsma,

    /// Actual/360.
    #[serde(rename = "Actual360")]
    Actual360,

    /// Actual/365 Fixed.
    #[serde(rename = "Actual365Fixed")]
    Actual365Fixed,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360BondBasis => Box::new(Thirty360BondBasis),
            DayCountConvention::ActualActualIsda => Box::new(ActActIsda),
            DayCountConvention::ActualActualBond => Box::new(ActActBond),
            DayCountConvention::ActualActualIsma => Box::new(ActActIsma),
            DayCountConvention::Actual360 => Box::new(Act360),
            DayCountConvention::Actual365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Day count between two dates.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.day_count(start, end),
            DayCountConvention::ActualActualIsda => ActActIsda.day_count(start, end),
            DayCountConvention::ActualActualBond => ActActBond.day_count(start, end),
            DayCountConvention::ActualActualIsma => ActActIsma.day_count(start, end),
            DayCountConvention::Actual360 => Act360.day_count(start, end),
            DayCountConvention::Actual365Fixed => Act365Fixed.day_count(start, end),
        }
    }

    /// Year fraction between two dates.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.to_day_count().year_fraction(start, end)
    }

    /// Year fraction within a coupon period (see [`DayCount::year_fraction_in_period`]).
    #[must_use]
    pub fn year_fraction_in_period(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
        periods_per_year: u32,
    ) -> Decimal {
        self.to_day_count().year_fraction_in_period(
            start,
            end,
            period_start,
            period_end,
            periods_per_year,
        )
    }

    /// Stable wire name.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360BondBasis => "Thirty360_BondBasis",
            DayCountConvention::ActualActualIsda => "ActualActual_ISDA",
            DayCountConvention::ActualActualBond => "ActualActual_Bond",
            DayCountConvention::ActualActualIsma => "ActualActual_ISMA",
            DayCountConvention::Actual360 => "Actual360",
            DayCountConvention::Actual365Fixed => "Actual365Fixed",
        }
    }

    /// Market display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360BondBasis => "30/360",
            DayCountConvention::ActualActualIsda => "ACT/ACT ISDA",
            DayCountConvention::ActualActualBond => "ACT/ACT Bond",
            DayCountConvention::ActualActualIsma => "ACT/ACT ISMA",
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365Fixed => "ACT/365F",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360BondBasis,
            DayCountConvention::ActualActualIsda,
            DayCountConvention::ActualActualBond,
            DayCountConvention::ActualActualIsma,
            DayCountConvention::Actual360,
            DayCountConvention::Actual365Fixed,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses wire names and the usual market spellings ("30/360", "ACT/ACT").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', ' '], "");

        match normalized.as_str() {
            "THIRTY360BONDBASIS" | "30/360" | "30/360BONDBASIS" | "BONDBASIS" | "30/360US"
            | "THIRTY360" => Ok(DayCountConvention::Thirty360BondBasis),

            "ACTUALACTUALISDA" | "ACT/ACTISDA" | "ACTUAL/ACTUALISDA" | "ACT/ACT" => {
                Ok(DayCountConvention::ActualActualIsda)
            }

            "ACTUALACTUALBOND" | "ACT/ACTBOND" | "ACTUAL/ACTUALBOND" => {
                Ok(DayCountConvention::ActualActualBond)
            }

            "ACTUALACTUALISMA" | "ACT/ACTISMA" | "ACT/ACTICMA" | "ACTUALACTUALICMA" | "ISMA" => {
                Ok(DayCountConvention::ActualActualIsma)
            }

            "ACTUAL360" | "ACT/360" | "ACTUAL/360" => Ok(DayCountConvention::Actual360),

            "ACTUAL365FIXED" | "ACT/365" | "ACT/365F" | "ACT/365FIXED" | "ACTUAL/365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }

            _ => Err(CoreError::unknown_convention("day count", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convention_enum_dispatch() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        for convention in DayCountConvention::all() {
            let dc = convention.to_day_count();
            assert!(!dc.name().is_empty());
            assert_eq!(dc.day_count(start, end), convention.day_count(start, end));

            let yf = convention.year_fraction(start, end);
            assert!(yf > dec!(0.4) && yf < dec!(0.6));
        }
    }

    #[test]
    fn test_wire_names_round_trip() {
        for convention in DayCountConvention::all() {
            let json = serde_json::to_string(convention).unwrap();
            assert_eq!(json, format!("\"{}\"", convention.wire_name()));
            let parsed: DayCountConvention = convention.wire_name().parse().unwrap();
            assert_eq!(parsed, *convention);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360BondBasis
        );
        assert_eq!(
            "ACT/ACT ICMA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActualIsma
        );
        assert_eq!(
            "act/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual365Fixed
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "ACT/999".parse::<DayCountConvention>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownConvention { .. }));
    }

    #[test]
    fn test_period_fraction_only_for_isma() {
        let start = Date::from_ymd(2025, 2, 15).unwrap();
        let end = Date::from_ymd(2025, 8, 15).unwrap();
        assert_eq!(
            DayCountConvention::ActualActualIsma.year_fraction_in_period(start, end, start, end, 2),
            dec!(0.5)
        );
        assert_eq!(
            DayCountConvention::Actual365Fixed.year_fraction_in_period(start, end, start, end, 2),
            dec!(181) / dec!(365)
        );
    }
}
