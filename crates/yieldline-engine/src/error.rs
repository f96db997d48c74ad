//! Engine error types.
//!
//! Every per-bond failure funnels into [`PositionError`]; at the batch
//! boundary it is flattened into an [`ErrorRecord`] with a stable
//! [`ErrorKind`] so one bad position never aborts the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yieldline_analytics::{AnalyticsError, SolverError};
use yieldline_bonds::error::{InvalidDateError, ParseError, ResolutionError};

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML did not parse into the expected shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value outside its range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Batch-level failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be started.
    #[error("worker pool: {0}")]
    Pool(String),
}

/// Failure of one position.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PositionError {
    /// Description could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Conventions or terms could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Settlement on or after maturity.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// Yield, risk or spread computation failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Malformed position input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The batch deadline passed before this position finished.
    #[error("batch timed out before this position completed")]
    Timeout,

    /// The worker computing this position panicked.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PositionError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Stable classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Resolution(_) => ErrorKind::Resolution,
            Self::InvalidDate(_) | Self::Analytics(AnalyticsError::InvalidDate(_)) => {
                ErrorKind::InvalidDate
            }
            Self::Analytics(AnalyticsError::Solver(SolverError::NonConvergent { .. })) => {
                ErrorKind::NonConvergent
            }
            Self::Analytics(AnalyticsError::Solver(SolverError::NegativeYield { .. })) => {
                ErrorKind::NegativeYield
            }
            Self::Analytics(AnalyticsError::Calculation(_)) => ErrorKind::Calculation,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Timeout => ErrorKind::Timeout,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for errors that are fatal to a single-bond request, outside a
    /// batch.
    #[must_use]
    pub fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Self::Resolution(ResolutionError::NoIdentifyingInformation) | Self::InvalidInput(_)
        )
    }
}

/// Stable error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unparsable description.
    Parse,
    /// No identifying information or incomplete terms.
    Resolution,
    /// Maturity on or before settlement.
    InvalidDate,
    /// Iteration cap exceeded.
    NonConvergent,
    /// Negative solved yield.
    NegativeYield,
    /// Arithmetic domain error.
    Calculation,
    /// Malformed input.
    InvalidInput,
    /// Batch deadline passed.
    Timeout,
    /// Worker failure.
    Internal,
}

impl ErrorKind {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Resolution => "resolution",
            Self::InvalidDate => "invalid_date",
            Self::NonConvergent => "non_convergent",
            Self::NegativeYield => "negative_yield",
            Self::Calculation => "calculation",
            Self::InvalidInput => "invalid_input",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed position as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Position index in the input.
    pub index: usize,
    /// Identifier key of the position.
    pub identifier: String,
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl ErrorRecord {
    /// Flattens a position error.
    #[must_use]
    pub fn new(index: usize, identifier: impl Into<String>, error: &PositionError) -> Self {
        Self {
            index,
            identifier: identifier.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldline_analytics::CalculationError;
    use yieldline_core::Date;

    #[test]
    fn test_kind_mapping() {
        let d = Date::from_ymd(2025, 1, 1).unwrap();
        let cases: Vec<(PositionError, ErrorKind)> = vec![
            (ParseError::Empty.into(), ErrorKind::Parse),
            (
                ResolutionError::NoIdentifyingInformation.into(),
                ErrorKind::Resolution,
            ),
            (
                InvalidDateError::MaturityNotAfterSettlement {
                    maturity: d,
                    settlement: d,
                }
                .into(),
                ErrorKind::InvalidDate,
            ),
            (
                AnalyticsError::from(SolverError::non_convergent("yield", 100, 0.5)).into(),
                ErrorKind::NonConvergent,
            ),
            (
                AnalyticsError::from(SolverError::NegativeYield { ytm: -0.01 }).into(),
                ErrorKind::NegativeYield,
            ),
            (
                AnalyticsError::from(CalculationError::NoFutureCashFlows).into(),
                ErrorKind::Calculation,
            ),
            (PositionError::Timeout, ErrorKind::Timeout),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::NonConvergent).unwrap(),
            "\"non_convergent\""
        );
        assert_eq!(ErrorKind::InvalidDate.to_string(), "invalid_date");
    }

    #[test]
    fn test_request_fatal() {
        assert!(PositionError::from(ResolutionError::NoIdentifyingInformation).is_request_fatal());
        assert!(PositionError::invalid_input("missing price").is_request_fatal());
        assert!(!PositionError::Timeout.is_request_fatal());
    }

    #[test]
    fn test_error_record() {
        let record = ErrorRecord::new(2, "XS1234567896", &PositionError::Timeout);
        assert_eq!(record.kind, ErrorKind::Timeout);
        assert_eq!(record.index, 2);
        assert!(record.message.contains("timed out"));
    }
}
