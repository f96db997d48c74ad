//! Interpolation on tenor pillars.

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// Interpolates a value at `x`.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at `x`.
    fn interpolate(&self, x: f64) -> MathResult<f64>;
}
