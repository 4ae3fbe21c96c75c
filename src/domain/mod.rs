//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Sample`) and model parameters (`SigmoidParams`)
//! - fit outputs (`SigmoidFit`, `FitSummary`)
//! - run configuration (`FitConfig`, `SimulateConfig`, `QualityWindow`)

pub mod types;

pub use types::*;
