//! Actual/365 Fixed day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed.
///
/// Actual calendar days over a fixed 365-day year, regardless of leap years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(start.days_between(&end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
