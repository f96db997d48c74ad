//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! max_workers = 8
//! batch_timeout_ms = 10000
//! fallback_to_coupon = true
//!
//! [solver]
//! tolerance = 1e-4
//! max_iterations = 100
//!
//! [spread]
//! min_spread_bps = -500.0
//! max_spread_bps = 1000.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use yieldline_analytics::spreads::ZSpreadConfig;
use yieldline_analytics::yields::{YieldSolver, YieldSolverConfig};
use yieldline_core::Date;

use crate::error::ConfigError;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads; the number of available cores when unset.
    pub max_workers: Option<usize>,
    /// Hard upper bound on worker threads.
    pub max_workers_cap: usize,
    /// Wall-clock budget for one batch, in milliseconds.
    pub batch_timeout_ms: u64,
    /// Yield search settings.
    pub solver: YieldSolverConfig,
    /// Z-spread search settings.
    pub spread: ZSpreadConfig,
    /// Substitute the coupon rate when the yield search does not converge.
    pub fallback_to_coupon: bool,
    /// Accept negative solved yields.
    pub allow_negative_yield: bool,
    /// Allowed distance of the weight sum from 100, in percentage points.
    pub weight_tolerance: f64,
    /// Trade date override; today when unset.
    pub as_of: Option<Date>,
    /// ISIN of the benchmark the curve represents, for reporting.
    pub benchmark_isin: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_workers: None,
            max_workers_cap: 32,
            batch_timeout_ms: 30_000,
            solver: YieldSolverConfig::default(),
            spread: ZSpreadConfig::default(),
            fallback_to_coupon: true,
            allow_negative_yield: false,
            weight_tolerance: 0.5,
            as_of: None,
            benchmark_isin: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks ranges and orderings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == Some(0) {
            return Err(ConfigError::invalid("max_workers", "must be at least 1"));
        }
        if self.max_workers_cap == 0 {
            return Err(ConfigError::invalid("max_workers_cap", "must be at least 1"));
        }
        if self.batch_timeout_ms == 0 {
            return Err(ConfigError::invalid("batch_timeout_ms", "must be positive"));
        }

        let solver = &self.solver;
        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            return Err(ConfigError::invalid("solver.tolerance", "must be positive"));
        }
        if solver.max_iterations == 0 {
            return Err(ConfigError::invalid("solver.max_iterations", "must be at least 1"));
        }
        if !(solver.min_yield < solver.max_yield) || solver.min_yield <= -1.0 {
            return Err(ConfigError::invalid(
                "solver",
                format!(
                    "yield range [{}, {}] must be increasing and above -100%",
                    solver.min_yield, solver.max_yield
                ),
            ));
        }

        let spread = &self.spread;
        if !(spread.tolerance.is_finite() && spread.tolerance > 0.0) {
            return Err(ConfigError::invalid("spread.tolerance", "must be positive"));
        }
        if spread.max_iterations == 0 {
            return Err(ConfigError::invalid("spread.max_iterations", "must be at least 1"));
        }
        if !(spread.min_spread_bps < spread.max_spread_bps) {
            return Err(ConfigError::invalid(
                "spread",
                format!(
                    "spread range [{}, {}] must be increasing",
                    spread.min_spread_bps, spread.max_spread_bps
                ),
            ));
        }

        if !(self.weight_tolerance.is_finite() && self.weight_tolerance >= 0.0) {
            return Err(ConfigError::invalid("weight_tolerance", "must be non-negative"));
        }
        Ok(())
    }

    /// Worker count for a batch of `positions`: the configured or detected
    /// count, capped by `max_workers_cap` and never more than the batch.
    #[must_use]
    pub fn worker_count(&self, positions: usize) -> usize {
        let requested = self.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        });
        requested.min(self.max_workers_cap).min(positions).max(1)
    }

    /// Batch deadline.
    #[must_use]
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }

    /// Yield solver built from these settings.
    #[must_use]
    pub fn yield_solver(&self) -> YieldSolver {
        YieldSolver::new(self.solver).with_allow_negative(self.allow_negative_yield)
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Sets the batch timeout.
    #[must_use]
    pub fn with_batch_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.batch_timeout_ms = timeout_ms;
        self
    }

    /// Enables or disables the coupon-rate fallback.
    #[must_use]
    pub fn with_fallback_to_coupon(mut self, enabled: bool) -> Self {
        self.fallback_to_coupon = enabled;
        self
    }

    /// Accepts negative yields.
    #[must_use]
    pub fn with_allow_negative_yield(mut self, allow: bool) -> Self {
        self.allow_negative_yield = allow;
        self
    }

    /// Sets the weight tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Pins the trade date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Replaces the yield search settings.
    #[must_use]
    pub fn with_solver(mut self, solver: YieldSolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.solver.max_iterations, 100);
        assert!((config.spread.max_spread_bps - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            max_workers = 4
            batch_timeout_ms = 5000
            as_of = "2025-06-27"

            [solver]
            max_iterations = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.max_workers, Some(4));
        assert_eq!(config.solver.max_iterations, 50);
        assert!((config.solver.tolerance - 1e-4).abs() < f64::EPSILON);
        assert_eq!(config.as_of, Some(Date::from_ymd(2025, 6, 27).unwrap()));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            EngineConfig::from_toml_str("max_workers = 0"),
            Err(ConfigError::Invalid { field: "max_workers", .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[solver]\nmin_yield = 0.6"),
            Err(ConfigError::Invalid { field: "solver", .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("max_workers = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_worker_count_is_bounded() {
        let config = EngineConfig::default().with_max_workers(64);
        assert_eq!(config.worker_count(1000), 32);
        assert_eq!(config.worker_count(3), 3);
        assert_eq!(config.worker_count(0), 1);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fallback_to_coupon = false\nweight_tolerance = 1.0").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(!config.fallback_to_coupon);
        assert!((config.weight_tolerance - 1.0).abs() < f64::EPSILON);

        assert!(matches!(
            EngineConfig::from_file("/nonexistent/yieldline.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
