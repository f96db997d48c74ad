//! Curve implementations.

mod flat;
mod shifted;
mod zero;

pub use flat::FlatCurve;
pub use shifted::ShiftedCurve;
pub use zero::{CurvePillar, ZeroCurve};
