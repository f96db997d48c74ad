//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// Specify how a date that falls on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day unless that crosses into the next
    /// month, in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day unless that crosses into the
    /// previous month, in which case move to the following business day.
    ModifiedPreceding,

    /// Use the date as-is.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns all conventions.
    #[must_use]
    pub fn all() -> &'static [BusinessDayConvention] {
        &[
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::Unadjusted,
        ]
    }

    /// Stable wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "ModifiedFollowing",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "ModifiedPreceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', ' ', '-'], "");
        match normalized.as_str() {
            "FOLLOWING" | "F" => Ok(BusinessDayConvention::Following),
            "MODIFIEDFOLLOWING" | "MF" | "MODFOLLOWING" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            "PRECEDING" | "P" => Ok(BusinessDayConvention::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(BusinessDayConvention::ModifiedPreceding),
            "UNADJUSTED" | "NONE" | "U" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(CoreError::unknown_convention("business day", s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}
