//! # Yieldline Curves
//!
//! Benchmark curves consumed by the spread engine.
//!
//! - [`BenchmarkCurve`](traits::BenchmarkCurve): zero rate and discount factor by tenor
//! - [`FlatCurve`](curves::FlatCurve), [`ZeroCurve`](curves::ZeroCurve): snapshot providers
//! - [`ShiftedCurve`](curves::ShiftedCurve): parallel shift used by the Z-spread search

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod curves;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{CurvePillar, FlatCurve, ShiftedCurve, ZeroCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::traits::BenchmarkCurve;
}

pub use error::{CurveError, CurveResult};
pub use traits::BenchmarkCurve;
