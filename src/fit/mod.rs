//! Curve fitting.
//!
//! Responsibilities:
//!
//! - generic Levenberg–Marquardt solver over any [`crate::models::CurveModel`]
//! - breakthrough-specific wrapper deriving DBC 10% and the quality score
//! - typed fit failures

pub mod error;
pub mod fitter;
pub mod levenberg;

pub use error::*;
pub use fitter::*;
pub use levenberg::*;
