//! Domain types shared by every Yieldline crate.
//!
//! - [`Date`]: calendar date with coupon-schedule arithmetic
//! - [`Frequency`]: coupon frequency
//! - [`Currency`]: ISO currency codes

mod currency;
mod date;
mod frequency;

pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;

pub(crate) use date::is_leap_year;
