//! Mathematical utilities: logistic helpers, statistics, least squares.

pub mod logistic;
pub mod ols;
pub mod stats;

pub use logistic::*;
pub use ols::*;
pub use stats::*;
