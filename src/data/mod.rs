//! Synthetic data generation for trying the fitter without a column run.

pub mod sample;

pub use sample::*;
