//! Error types for bond identification, resolution and scheduling.

use thiserror::Error;
use yieldline_core::{CoreError, Date};

/// Description parsing failures.
///
/// These are recovered by the resolver, which falls through to the next tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("description is empty")]
    Empty,

    /// No supported description layout matched.
    #[error("no description pattern matched '{description}'")]
    NoPatternMatch {
        /// The rejected description.
        description: String,
    },

    /// The coupon text is not a usable rate.
    #[error("invalid coupon '{value}': {reason}")]
    InvalidCoupon {
        /// The coupon text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The maturity text is not a calendar date.
    #[error("invalid maturity '{value}': {reason}")]
    InvalidDate {
        /// The maturity text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ParseError {
    /// Creates an invalid coupon error.
    #[must_use]
    pub fn invalid_coupon(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoupon {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Convention resolution failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No ISIN, no description and no ticker.
    #[error("identifier carries no usable information")]
    NoIdentifyingInformation,

    /// Conventions were resolved but the economic terms are unknown.
    #[error("cannot build bond '{key}': {missing} unknown")]
    IncompleteTerms {
        /// Resolution key.
        key: String,
        /// Missing field.
        missing: &'static str,
    },

    /// Supplied or stored terms violate a bond invariant.
    #[error("invalid terms for '{key}': {reason}")]
    InvalidTerms {
        /// Resolution key.
        key: String,
        /// What is wrong.
        reason: String,
    },
}

/// Date-related failures that make a bond unusable for a settlement date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDateError {
    /// Maturity on or before settlement.
    #[error("maturity {maturity} is not after settlement {settlement}")]
    MaturityNotAfterSettlement {
        /// Bond maturity.
        maturity: Date,
        /// Settlement date.
        settlement: Date,
    },

    /// Date arithmetic failed.
    #[error("calendar error: {0}")]
    Calendar(#[from] CoreError),
}

/// Accrual arithmetic failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    /// The coupon period has no length under the day count.
    #[error("coupon period {start} to {end} has zero length")]
    ZeroPeriod {
        /// Period start.
        start: Date,
        /// Period end.
        end: Date,
    },
}

/// ISIN validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Wrong length.
    #[error("ISIN must be 12 characters, got {actual}")]
    InvalidLength {
        /// Actual length.
        actual: usize,
    },

    /// Structural problem (country prefix, characters).
    #[error("invalid ISIN format: {reason}")]
    InvalidFormat {
        /// Description of the problem.
        reason: String,
    },

    /// Luhn check digit mismatch.
    #[error("invalid ISIN check digit: {value}")]
    InvalidCheckDigit {
        /// The rejected ISIN.
        value: String,
    },
}

/// Convention table ingestion failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The JSON payload could not be decoded.
    #[error("cannot decode convention table: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
