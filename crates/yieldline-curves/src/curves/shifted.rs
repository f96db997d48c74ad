//! Parallel-shifted curve wrapper.

use crate::error::CurveResult;
use crate::traits::BenchmarkCurve;

/// A curve wrapper that adds a constant spread to every zero rate.
///
/// `r_shifted(t) = r_base(t) + spread`, so
/// `DF_shifted(t) = DF_base(t) · exp(-spread · t)`.
///
/// ```rust
/// use yieldline_curves::prelude::*;
///
/// let base = FlatCurve::new(0.04);
/// let shifted = ShiftedCurve::new(&base, 0.0050);
/// assert!(shifted.discount_factor(1.0).unwrap() < base.discount_factor(1.0).unwrap());
/// ```
pub struct ShiftedCurve<'a, C: BenchmarkCurve + ?Sized> {
    base: &'a C,
    spread: f64,
}

impl<'a, C: BenchmarkCurve + ?Sized> ShiftedCurve<'a, C> {
    /// Creates a shifted view of `base`. `spread` is a decimal (0.01 = 100 bp).
    pub fn new(base: &'a C, spread: f64) -> Self {
        Self { base, spread }
    }

    /// Returns the spread applied to this curve.
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Same base curve, different spread.
    pub fn with_spread(&self, spread: f64) -> ShiftedCurve<'a, C> {
        ShiftedCurve {
            base: self.base,
            spread,
        }
    }
}

impl<C: BenchmarkCurve + ?Sized> BenchmarkCurve for ShiftedCurve<'_, C> {
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        Ok(self.base.zero_rate(t)? + self.spread)
    }

    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let base_df = self.base.discount_factor(t)?;
        Ok(base_df * (-self.spread * t).exp())
    }

    fn name(&self) -> &str {
        "shifted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_shift_adds_to_rate() {
        let base = FlatCurve::new(0.04);
        let shifted = ShiftedCurve::new(&base, 0.01);
        assert_relative_eq!(shifted.zero_rate(5.0).unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(
            shifted.discount_factor(5.0).unwrap(),
            (-0.25f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_with_spread() {
        let base = FlatCurve::new(0.04);
        let shifted = ShiftedCurve::new(&base, 0.01).with_spread(-0.02);
        assert_relative_eq!(shifted.spread(), -0.02);
        assert_relative_eq!(shifted.zero_rate(1.0).unwrap(), 0.02, epsilon = 1e-12);
    }

    proptest::proptest! {
        #[test]
        fn prop_positive_shift_lowers_discount_factor(
            rate in -0.02f64..0.10,
            spread in 0.0001f64..0.10,
            t in 0.01f64..50.0,
        ) {
            let base = FlatCurve::new(rate);
            let shifted = ShiftedCurve::new(&base, spread);
            proptest::prop_assert!(
                shifted.discount_factor(t).unwrap() < base.discount_factor(t).unwrap()
            );
        }
    }
}
