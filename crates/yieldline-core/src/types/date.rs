//! Date type for bond calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Thin newtype over `chrono::NaiveDate` with the month arithmetic that coupon
/// schedules need (clamped month addition, end-of-month checks).
///
/// # Example
///
/// ```rust
/// use yieldline_core::types::Date;
///
/// let maturity = Date::from_ymd(2052, 8, 15).unwrap();
/// let previous = maturity.add_months(-6).unwrap();
/// assert_eq!(previous, Date::from_ymd(2052, 2, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the components do not form a date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (YYYY-MM-DD).
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date in local time.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a (possibly negative) number of months.
    ///
    /// Days that do not exist in the target month are clamped to its last day,
    /// so 2024-08-31 minus six months is 2024-02-29.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years, clamping 29 February in non-leap years.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let new_year = self.year() + years;
        let new_day = self.day().min(days_in_month(new_year, self.month()));
        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Calendar days from `self` to `other` (negative if `other` is earlier).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Days in `month` of `year`. Months outside 1..=12 report 0.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Gregorian leap-year rule.
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 30).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 30);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 29).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::from_ymd(2025, 0, 1).is_err());
    }

    #[test]
    fn test_add_months_clamps() {
        let date = Date::from_ymd(2025, 1, 31).unwrap();
        let result = date.add_months(1).unwrap();
        assert_eq!(result, Date::from_ymd(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_add_months_backward_across_year() {
        let date = Date::from_ymd(2025, 2, 15).unwrap();
        assert_eq!(
            date.add_months(-6).unwrap(),
            Date::from_ymd(2024, 8, 15).unwrap()
        );
        assert_eq!(
            date.add_months(-26).unwrap(),
            Date::from_ymd(2022, 12, 15).unwrap()
        );
    }

    #[test]
    fn test_add_years_leap_day() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
        assert_eq!(date.add_years(4).unwrap(), Date::from_ymd(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_leap_year() {
        assert!(Date::from_ymd(2024, 1, 1).unwrap().is_leap_year());
        assert!(!Date::from_ymd(2025, 1, 1).unwrap().is_leap_year());
        assert!(!Date::from_ymd(2100, 1, 1).unwrap().is_leap_year());
        assert!(Date::from_ymd(2000, 1, 1).unwrap().is_leap_year());
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2025, 2, 15).unwrap();
        let d2 = Date::from_ymd(2025, 8, 15).unwrap();
        assert_eq!(d1.days_between(&d2), 181);
        assert_eq!(d2.days_between(&d1), -181);
        assert_eq!(d2 - d1, 181);
    }

    #[test]
    fn test_end_of_month() {
        let d = Date::from_ymd(2024, 2, 10).unwrap();
        assert_eq!(d.end_of_month(), Date::from_ymd(2024, 2, 29).unwrap());
        assert!(d.end_of_month().is_end_of_month());
        assert!(!d.is_end_of_month());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2052-08-15".parse().unwrap();
        assert_eq!(date.to_string(), "2052-08-15");
        assert!(Date::parse("15/08/2052").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_add_months_inverts_for_early_days(
            year in 1990i32..2080,
            month in 1u32..=12,
            day in 1u32..=28,
            months in -360i32..360,
        ) {
            let date = Date::from_ymd(year, month, day).unwrap();
            let shifted = date.add_months(months).unwrap();
            proptest::prop_assert_eq!(shifted.day(), day);
            proptest::prop_assert_eq!(shifted.add_months(-months).unwrap(), date);
        }
    }

    #[test]
    fn test_weekend() {
        assert!(Date::from_ymd(2025, 6, 28).unwrap().is_weekend());
        assert!(!Date::from_ymd(2025, 6, 30).unwrap().is_weekend());
    }
}
