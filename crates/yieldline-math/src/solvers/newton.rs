//! Newton-Raphson root finding.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Smallest derivative magnitude accepted before a step is taken.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton-Raphson root-finding algorithm.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)` until `|f(x)| < tolerance`.
///
/// ```rust
/// use yieldline_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    bounded_newton(f, df, initial_guess, (f64::NEG_INFINITY, f64::INFINITY), config)
}

/// Newton-Raphson with every iterate clamped to `[lower, upper]`.
///
/// The starting point is clamped as well. A search whose root lies outside the
/// range ends up pinned at a bound and fails with
/// [`MathError::ConvergenceFailed`] once `max_iterations` is exhausted. The
/// iteration never returns NaN: a non-finite function value or derivative is
/// reported as an error.
///
/// ```rust
/// use yieldline_math::solvers::{bounded_newton, SolverConfig};
///
/// // Root at 3.0 is outside [0, 2]
/// let f = |x: f64| x - 3.0;
/// let df = |_x: f64| 1.0;
/// assert!(bounded_newton(f, df, 1.0, (0.0, 2.0), &SolverConfig::default()).is_err());
/// ```
pub fn bounded_newton<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (lower, upper) = bounds;
    if lower.is_nan() || upper.is_nan() || lower > upper {
        return Err(MathError::invalid_input(format!(
            "invalid bounds [{lower}, {upper}]"
        )));
    }
    if !initial_guess.is_finite() {
        return Err(MathError::invalid_input("initial guess must be finite"));
    }

    let mut x = initial_guess.clamp(lower, upper);
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        if !fx.is_finite() {
            return Err(MathError::convergence_failed(iteration, x, fx));
        }
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        x = (x - fx / dfx).clamp(lower, upper);
        fx = f(x);
    }

    if fx.is_finite() && fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: config.max_iterations,
            residual: fx,
        });
    }

    log::debug!(
        "newton search exhausted {} iterations at x={x:.6e}, residual={fx:.2e}",
        config.max_iterations
    );
    Err(MathError::convergence_failed(config.max_iterations, x, fx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bounded_root_inside_range() {
        // Discount factor equation: 100 / (1 + y)^5 = 80
        let f = |y: f64| 100.0 / (1.0 + y).powi(5) - 80.0;
        let df = |y: f64| -500.0 / (1.0 + y).powi(6);

        let result = bounded_newton(f, df, 0.0, (-0.05, 0.5), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 1.25f64.powf(0.2) - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bounded_root_outside_range_fails() {
        let f = |y: f64| 100.0 / (1.0 + y).powi(5) - 1.0;
        let df = |y: f64| -500.0 / (1.0 + y).powi(6);

        let err = bounded_newton(f, df, 0.05, (-0.05, 0.5), &SolverConfig::default()).unwrap_err();
        match err {
            MathError::ConvergenceFailed {
                iterations, last, ..
            } => {
                assert_eq!(iterations, 100);
                assert_relative_eq!(last, 0.5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_initial_guess_is_clamped() {
        let f = |x: f64| x - 1.0;
        let df = |_x: f64| 1.0;

        let result = bounded_newton(f, df, 50.0, (0.0, 2.0), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 1.0);
    }

    #[test]
    fn test_zero_derivative() {
        let f = |_x: f64| 1.0;
        let df = |_x: f64| 0.0;
        assert!(matches!(
            newton_raphson(f, df, 0.0, &SolverConfig::default()),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_invalid_bounds() {
        let f = |x: f64| x;
        let df = |_x: f64| 1.0;
        assert!(bounded_newton(f, df, 0.0, (1.0, -1.0), &SolverConfig::default()).is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_bounded_result_stays_in_range(target in -10.0f64..10.0, guess in -20.0f64..20.0) {
            let f = |x: f64| x.powi(3) - target;
            let df = |x: f64| 3.0 * x * x + 1e-3;
            match bounded_newton(f, df, guess, (-1.5, 1.5), &SolverConfig::default()) {
                Ok(result) => {
                    proptest::prop_assert!(result.root >= -1.5 && result.root <= 1.5);
                    proptest::prop_assert!(result.residual.abs() < 1e-10);
                }
                Err(MathError::ConvergenceFailed { last, .. }) => {
                    proptest::prop_assert!(last.is_finite());
                    proptest::prop_assert!((-1.5..=1.5).contains(&last));
                }
                Err(_) => {}
            }
        }
    }
}
