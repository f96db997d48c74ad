//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: plain Newton iteration with an analytic derivative
//! - [`bounded_newton`]: Newton iteration with every iterate clamped to a range,
//!   used by the yield and spread searches so a bad starting point cannot
//!   diverge or produce NaN

mod newton;

pub use newton::{bounded_newton, newton_raphson};

/// Default tolerance on the function value.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on `|f(x)|`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Iterations used.
    pub iterations: u32,
    /// `f(root)`.
    pub residual: f64,
}
