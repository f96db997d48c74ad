//! Actual/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360.
///
/// Actual calendar days over a 360-day year. Money market instruments and
/// floating rate notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(start.days_between(&end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
