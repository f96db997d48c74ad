//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Piecewise-linear interpolation between data points.
///
/// Outside the data range the interpolator either fails or, with
/// [`with_flat_extrapolation`](Self::with_flat_extrapolation), holds the end
/// values constant.
///
/// ```rust
/// use yieldline_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.04, 0.05]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 0.045).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    flat_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// `xs` must be strictly increasing and the same length as `ys`. A single
    /// point is accepted and yields a constant.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("values must be finite"));
        }

        Ok(Self {
            xs,
            ys,
            flat_extrapolation: false,
        })
    }

    /// Holds the first and last values constant outside the data range.
    #[must_use]
    pub fn with_flat_extrapolation(mut self) -> Self {
        self.flat_extrapolation = true;
        self
    }

    /// The x coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The y coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let n = self.xs.len();
        let (first, last) = (self.xs[0], self.xs[n - 1]);

        if x < first || x > last {
            if !self.flat_extrapolation {
                return Err(MathError::invalid_input(format!(
                    "{x} is outside [{first}, {last}]"
                )));
            }
            return Ok(if x < first { self.ys[0] } else { self.ys[n - 1] });
        }
        if n == 1 {
            return Ok(self.ys[0]);
        }

        // First pillar strictly above x, bounded to a valid segment
        let upper = self.xs.partition_point(|&p| p <= x).clamp(1, n - 1);
        let (x0, x1) = (self.xs[upper - 1], self.xs[upper]);
        let (y0, y1) = (self.ys[upper - 1], self.ys[upper]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }
}
