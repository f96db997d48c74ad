//! # Yieldline Math
//!
//! Numerical routines for the Yieldline fixed income analytics library.
//!
//! - **Solvers**: Newton-Raphson, including a range-clamped variant
//! - **Interpolation**: linear interpolation with optional flat extrapolation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::solvers::{bounded_newton, newton_raphson, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
