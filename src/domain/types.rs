//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to CSV/JSON
//! - printed in the terminal report

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Breakthrough fraction whose loading defines the reported capacity.
pub const DBC_FRACTION: f64 = 0.10;

/// One observation: resin loading (x) against fraction breakthrough (y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Free parameters of the logistic breakthrough model.
///
/// `k` is the steepness (negative for a decreasing curve) and `x0` the loading
/// at which the curve crosses 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    pub k: f64,
    pub x0: f64,
}

impl SigmoidParams {
    pub fn new(k: f64, x0: f64) -> Self {
        Self { k, x0 }
    }
}

impl Default for SigmoidParams {
    /// Starting guess tuned for loadings in the 0–200 g/L range.
    fn default() -> Self {
        Self { k: 0.4, x0: 70.0 }
    }
}

/// Everything the fitter produces for one sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidFit {
    pub params: SigmoidParams,
    /// Loading at which the fitted curve reaches 10% breakthrough.
    pub dbc_10: f64,
    /// `Σ(ŷ - ȳ)² / Σ(y - ȳ)²`.
    ///
    /// Note the numerator uses the *predicted* deviation from the observed
    /// mean, not the residual. Values can land outside `[0, 1]`.
    pub quality: f64,
    pub iterations: usize,
    pub sse: f64,
}

/// Acceptance window for the quality score: `center ± tolerance`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWindow {
    pub center: f64,
    pub tolerance: f64,
}

impl QualityWindow {
    pub fn new(tolerance: f64) -> Self {
        Self {
            center: 1.0,
            tolerance,
        }
    }

    pub fn lower(&self) -> f64 {
        self.center - self.tolerance
    }

    pub fn upper(&self) -> f64 {
        self.center + self.tolerance
    }

    pub fn contains(&self, quality: f64) -> bool {
        quality >= self.lower() && quality <= self.upper()
    }
}

impl Default for QualityWindow {
    fn default() -> Self {
        Self::new(0.05)
    }
}

/// A full `dbc fit` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env`/environment defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub delimiter: u8,
    pub resin_type: String,
    pub residence_time: String,
    pub initial_guess: SigmoidParams,
    pub max_iterations: usize,
    pub quality_window: QualityWindow,
    pub out_dir: PathBuf,
    pub plot: bool,
    pub summary_json: Option<PathBuf>,
}

/// Configuration for `dbc simulate`.
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub params: SigmoidParams,
    /// Standard deviation of the additive Gaussian noise on y.
    pub noise: f64,
    pub seed: u64,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub out: PathBuf,
}

/// The JSON fit summary written by `--summary-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummary {
    pub tool: String,
    pub generated: String,
    pub input: String,
    pub resin_type: String,
    pub residence_time: String,
    pub initial_guess: SigmoidParams,
    pub fit: SigmoidFit,
    pub quality_window: QualityWindow,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub loading: Vec<f64>,
    pub breakthrough: Vec<f64>,
}
