//! Coupon frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Coupon payment frequency.
///
/// Serialized with the stable names `Annual`, `Semiannual`, `Quarterly`, `Monthly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// One coupon per year.
    Annual,
    /// Two coupons per year, the US and UK government norm.
    #[default]
    Semiannual,
    /// Four coupons per year.
    Quarterly,
    /// Twelve coupons per year.
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::Semiannual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Returns the frequency for a number of periods per year.
    #[must_use]
    pub fn from_periods_per_year(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(Frequency::Annual),
            2 => Some(Frequency::Semiannual),
            4 => Some(Frequency::Quarterly),
            12 => Some(Frequency::Monthly),
            _ => None,
        }
    }

    /// Returns the stable wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }

    /// All supported frequencies.
    #[must_use]
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Annual,
            Frequency::Semiannual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Accepts wire names, common abbreviations and period counts ("2").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "ANNUAL" | "A" | "1" | "YEARLY" => Ok(Frequency::Annual),
            "SEMIANNUAL" | "S" | "SA" | "2" => Ok(Frequency::Semiannual),
            "QUARTERLY" | "Q" | "4" => Ok(Frequency::Quarterly),
            "MONTHLY" | "M" | "12" => Ok(Frequency::Monthly),
            _ => Err(CoreError::unknown_convention("frequency", s)),
        }
    }
}
