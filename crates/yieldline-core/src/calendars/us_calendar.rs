//! US government bond market calendar.

use chrono::Weekday;

use super::{is_last_weekday, is_nth_weekday, Calendar};
use crate::types::Date;

/// US Federal Reserve calendar for government securities.
///
/// Fixed-date holidays observed on the nearest weekday, plus the Monday and
/// Thursday floating holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct USCalendar;

impl USCalendar {
    fn is_federal_holiday(&self, date: Date) -> bool {
        let year = date.year();
        let weekday = date.weekday();

        let fixed = match (date.month(), date.day()) {
            (1, 1) | (7, 4) | (11, 11) | (12, 25) => true,
            (6, 19) => year >= 2021,
            // Saturday holidays observed on Friday
            (12, 31) | (7, 3) | (11, 10) | (12, 24) => weekday == Weekday::Fri,
            (6, 18) => year >= 2021 && weekday == Weekday::Fri,
            // Sunday holidays observed on Monday
            (1, 2) | (7, 5) | (11, 12) | (12, 26) => weekday == Weekday::Mon,
            (6, 20) => year >= 2021 && weekday == Weekday::Mon,
            _ => false,
        };
        if fixed {
            return true;
        }

        match date.month() {
            // Martin Luther King Jr. Day and Presidents Day
            1 | 2 => is_nth_weekday(date, Weekday::Mon, 3),
            // Memorial Day
            5 => is_last_weekday(date, Weekday::Mon),
            // Labor Day
            9 => is_nth_weekday(date, Weekday::Mon, 1),
            // Columbus Day
            10 => is_nth_weekday(date, Weekday::Mon, 2),
            // Thanksgiving
            11 => is_nth_weekday(date, Weekday::Thu, 4),
            _ => false,
        }
    }
}

impl Calendar for USCalendar {
    fn name(&self) -> &'static str {
        "US Government Bond"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_federal_holiday(date)
    }
}
