//! Business day calendars and conventions.
//!
//! This module provides:
//! - Rule-based holiday calendars for the regions the convention tables use
//! - Business day adjustment conventions
//! - Business-day arithmetic for settlement lags

use chrono::Weekday;
use serde::{Deserialize, Serialize};

mod conventions;
mod target;
mod uk;
mod us_calendar;

pub use conventions::{adjust, BusinessDayConvention};
pub use target::TargetCalendar;
pub use uk::UKCalendar;
pub use us_calendar::USCalendar;

use crate::error::CoreError;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend day or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// Weekend-only calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Holiday calendar region attached to a bond definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarRegion {
    /// US government bond market (Federal Reserve holidays).
    #[default]
    UnitedStates,
    /// England and Wales bank holidays.
    UnitedKingdom,
    /// Euro-area TARGET settlement days.
    Target,
    /// Weekends only.
    WeekendOnly,
}

static US_CALENDAR: USCalendar = USCalendar;
static UK_CALENDAR: UKCalendar = UKCalendar;
static TARGET_CALENDAR: TargetCalendar = TargetCalendar;
static WEEKEND_CALENDAR: WeekendCalendar = WeekendCalendar;

impl CalendarRegion {
    /// Returns the calendar implementation for this region.
    #[must_use]
    pub fn calendar(&self) -> &'static dyn Calendar {
        match self {
            CalendarRegion::UnitedStates => &US_CALENDAR,
            CalendarRegion::UnitedKingdom => &UK_CALENDAR,
            CalendarRegion::Target => &TARGET_CALENDAR,
            CalendarRegion::WeekendOnly => &WEEKEND_CALENDAR,
        }
    }

    /// Region implied by an ISIN country prefix.
    #[must_use]
    pub fn for_country(country: &str) -> Self {
        match country {
            "US" => CalendarRegion::UnitedStates,
            "GB" => CalendarRegion::UnitedKingdom,
            "DE" | "FR" | "IT" | "ES" | "NL" | "BE" | "AT" | "IE" | "FI" | "PT" | "LU" | "XS" => {
                CalendarRegion::Target
            }
            other => {
                log::debug!("no holiday calendar for country '{other}', using weekends only");
                CalendarRegion::WeekendOnly
            }
        }
    }
}

impl std::fmt::Display for CalendarRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CalendarRegion::UnitedStates => "UnitedStates",
            CalendarRegion::UnitedKingdom => "UnitedKingdom",
            CalendarRegion::Target => "Target",
            CalendarRegion::WeekendOnly => "WeekendOnly",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for CalendarRegion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', ' ', '-'], "");
        match normalized.as_str() {
            "UNITEDSTATES" | "US" | "USA" | "NYSE" | "SIFMA" => Ok(CalendarRegion::UnitedStates),
            "UNITEDKINGDOM" | "UK" | "GB" | "LONDON" => Ok(CalendarRegion::UnitedKingdom),
            "TARGET" | "TARGET2" | "EUR" | "EURO" => Ok(CalendarRegion::Target),
            "WEEKENDONLY" | "WEEKEND" | "NONE" => Ok(CalendarRegion::WeekendOnly),
            _ => Err(CoreError::unknown_convention("calendar", s)),
        }
    }
}

/// Easter Sunday for a Gregorian year (anonymous Gregorian algorithm).
pub(crate) fn easter_sunday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32).ok()
}

/// Returns true if `date` is the nth occurrence of `weekday` in its month.
pub(crate) fn is_nth_weekday(date: Date, weekday: Weekday, n: u32) -> bool {
    date.weekday() == weekday && (date.day() - 1) / 7 + 1 == n
}

/// Returns true if `date` is the last occurrence of `weekday` in its month.
pub(crate) fn is_last_weekday(date: Date, weekday: Weekday) -> bool {
    date.weekday() == weekday && date.add_days(7).month() != date.month()
}

/// Returns true if `date` is `offset` days from Easter Sunday of its year.
pub(crate) fn is_easter_offset(date: Date, offset: i64) -> bool {
    easter_sunday(date.year()).is_some_and(|easter| easter.add_days(offset) == date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(!cal.is_business_day(d(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        assert_eq!(cal.add_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), 0), d(2025, 1, 6));
    }

    #[test]
    fn test_easter_dates() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(d(2026, 4, 5)));
        assert_eq!(easter_sunday(2038), Some(d(2038, 4, 25)));
    }

    #[test]
    fn test_region_calendars() {
        // 2025-07-04 is a Friday, a holiday only in the US
        let july4 = d(2025, 7, 4);
        assert!(!CalendarRegion::UnitedStates.calendar().is_business_day(july4));
        assert!(CalendarRegion::UnitedKingdom.calendar().is_business_day(july4));
        assert!(CalendarRegion::Target.calendar().is_business_day(july4));
        assert!(CalendarRegion::WeekendOnly.calendar().is_business_day(july4));
    }

    #[test]
    fn test_region_for_country() {
        assert_eq!(CalendarRegion::for_country("US"), CalendarRegion::UnitedStates);
        assert_eq!(CalendarRegion::for_country("GB"), CalendarRegion::UnitedKingdom);
        assert_eq!(CalendarRegion::for_country("XS"), CalendarRegion::Target);
        assert_eq!(CalendarRegion::for_country("JP"), CalendarRegion::WeekendOnly);
    }

    #[test]
    fn test_region_parse() {
        assert_eq!("UK".parse::<CalendarRegion>().unwrap(), CalendarRegion::UnitedKingdom);
        assert_eq!("TARGET2".parse::<CalendarRegion>().unwrap(), CalendarRegion::Target);
        assert!("Mars".parse::<CalendarRegion>().is_err());
    }
}
