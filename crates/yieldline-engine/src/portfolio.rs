//! Batch analysis and portfolio aggregation.
//!
//! Every position runs the pipeline independently; failures become
//! [`ErrorRecord`]s and the portfolio metrics are taken over the successes
//! only, weighted by market value. Negative weights are rejected per
//! position, so every market value in the sums is non-negative:
//!
//! ```text
//! metric_portfolio = Σ(metric_i × weight_i × price_i) / Σ(weight_i × price_i)
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::context::EngineContext;
use crate::error::{EngineError, ErrorRecord, PositionError};
use crate::pipeline::{analyze_position, AnalyticsResult, PortfolioPosition};
use crate::pool::{TaskFailure, WorkerPool};

/// Outcome of one position, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PositionOutcome {
    /// Analytics computed.
    Success {
        /// Position index in the input.
        index: usize,
        /// Effective weight in percent.
        weight: f64,
        /// The analytics.
        result: AnalyticsResult,
    },
    /// The position failed.
    Failure(ErrorRecord),
}

impl PositionOutcome {
    /// The analytics, for a successful position.
    #[must_use]
    pub fn result(&self) -> Option<&AnalyticsResult> {
        match self {
            Self::Success { result, .. } => Some(result),
            Self::Failure(_) => None,
        }
    }

    /// The error, for a failed position.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(record) => Some(record),
        }
    }

    /// True for a successful position.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Portfolio-level summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalytics {
    /// Positions in the input.
    pub total_positions: usize,
    /// Positions with analytics.
    pub successful: usize,
    /// Positions with an error record.
    pub failed: usize,
    /// `successful / total_positions`.
    pub success_rate: f64,
    /// Market-value weighted yield.
    pub weighted_ytm: Option<f64>,
    /// Market-value weighted modified duration.
    pub weighted_duration: Option<f64>,
    /// Market-value weighted convexity.
    pub weighted_convexity: Option<f64>,
    /// Market-value weighted Z-spread in basis points, over positions that
    /// have one.
    pub weighted_spread: Option<f64>,
    /// Sum of effective weights over positions with a valid weight.
    pub total_weight: f64,
    /// True when the weight sum is outside tolerance of 100.
    pub weight_warning: bool,
    /// Positions carrying a fallback value.
    pub degraded: usize,
    /// True when the batch deadline passed.
    pub timed_out: bool,
}

/// Per-position outcomes and the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// One outcome per input position, in input order.
    pub positions: Vec<PositionOutcome>,
    /// Aggregated metrics.
    pub summary: PortfolioAnalytics,
}

impl PortfolioReport {
    /// Successful results in input order.
    pub fn results(&self) -> impl Iterator<Item = &AnalyticsResult> {
        self.positions.iter().filter_map(PositionOutcome::result)
    }

    /// Error records in input order.
    pub fn errors(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.positions.iter().filter_map(PositionOutcome::error)
    }
}

/// Effective weights: supplied weights as given, `100 / n` for the rest.
#[must_use]
pub fn effective_weights(positions: &[PortfolioPosition]) -> Vec<f64> {
    let equal = if positions.is_empty() {
        0.0
    } else {
        100.0 / positions.len() as f64
    };
    positions.iter().map(|p| p.weight.unwrap_or(equal)).collect()
}

/// Analyzes every position on the worker pool and aggregates the results.
#[instrument(skip_all, fields(positions = positions.len()))]
pub fn analyze_portfolio(
    ctx: Arc<EngineContext>,
    positions: Vec<PortfolioPosition>,
) -> Result<PortfolioReport, EngineError> {
    let config = ctx.config().clone();
    let total = positions.len();
    let weights = effective_weights(&positions);
    let keys: Vec<String> = positions.iter().map(|p| p.identifier.key()).collect();

    let valid: Vec<bool> = positions.iter().map(|p| p.checked_weight().is_ok()).collect();
    let rejected = valid.iter().filter(|ok| !**ok).count();
    if rejected > 0 {
        warn!(rejected, "positions with negative or non-finite weights rejected");
    }

    let total_weight: f64 = weights
        .iter()
        .zip(&valid)
        .filter(|(_, ok)| **ok)
        .map(|(w, _)| w)
        .sum();
    let weight_warning = (total_weight - 100.0).abs() > config.weight_tolerance;
    if weight_warning {
        warn!(
            total_weight,
            tolerance = config.weight_tolerance,
            "position weights do not sum to 100"
        );
    }

    let pool = WorkerPool::new(config.worker_count(total), config.batch_timeout());
    info!(workers = pool.workers(), "batch started");

    let task_ctx = Arc::clone(&ctx);
    let outcome = pool.run(
        positions,
        move |position: &PortfolioPosition| -> Result<AnalyticsResult, PositionError> {
            position.checked_weight()?;
            analyze_position(&task_ctx, position)
        },
    )?;

    let outcomes: Vec<PositionOutcome> = outcome
        .slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let result = slot.unwrap_or_else(|failure| {
                Err(match failure {
                    TaskFailure::TimedOut => PositionError::Timeout,
                    TaskFailure::Panicked(message) => PositionError::Internal(message),
                })
            });
            match result {
                Ok(result) => PositionOutcome::Success {
                    index,
                    weight: weights[index],
                    result,
                },
                Err(err) => PositionOutcome::Failure(ErrorRecord::new(index, &keys[index], &err)),
            }
        })
        .collect();

    let summary = summarize(&outcomes, total_weight, weight_warning, outcome.timed_out);
    info!(
        successful = summary.successful,
        failed = summary.failed,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "batch finished"
    );

    Ok(PortfolioReport {
        positions: outcomes,
        summary,
    })
}

fn summarize(
    outcomes: &[PositionOutcome],
    total_weight: f64,
    weight_warning: bool,
    timed_out: bool,
) -> PortfolioAnalytics {
    let total = outcomes.len();
    let successes: Vec<(f64, &AnalyticsResult)> = outcomes
        .iter()
        .filter_map(|o| match o {
            PositionOutcome::Success { weight, result, .. } => Some((*weight, result)),
            PositionOutcome::Failure(_) => None,
        })
        .collect();
    let successful = successes.len();

    PortfolioAnalytics {
        total_positions: total,
        successful,
        failed: total - successful,
        success_rate: if total == 0 {
            0.0
        } else {
            successful as f64 / total as f64
        },
        weighted_ytm: market_value_weighted(&successes, |r| Some(r.ytm)),
        weighted_duration: market_value_weighted(&successes, |r| Some(r.duration)),
        weighted_convexity: market_value_weighted(&successes, |r| Some(r.convexity)),
        weighted_spread: market_value_weighted(&successes, |r| r.spread),
        total_weight,
        weight_warning,
        degraded: successes.iter().filter(|(_, r)| r.degraded).count(),
        timed_out,
    }
}

/// `Σ(m_i × w_i × p_i) / Σ(w_i × p_i)` over results where `metric` is
/// present; `None` when nothing carries market value.
fn market_value_weighted<F>(results: &[(f64, &AnalyticsResult)], metric: F) -> Option<f64>
where
    F: Fn(&AnalyticsResult) -> Option<f64>,
{
    let (sum, market_value) = results
        .iter()
        .filter_map(|(w, r)| metric(r).map(|m| (m, w * r.clean_price)))
        .fold((0.0, 0.0), |(sum, mv), (m, v)| (sum + m * v, mv + v));
    (market_value.abs() > f64::EPSILON).then(|| sum / market_value)
}
