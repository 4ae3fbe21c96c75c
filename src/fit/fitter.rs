//! Breakthrough-curve fitting.
//!
//! Fits the logistic model to a sample set, then derives:
//! - the 10% dynamic binding capacity (closed-form inverse, no re-fit)
//! - the quality score `Σ(ŷ - ȳ)² / Σ(y - ȳ)²`
//!
//! Pure computation; no I/O.

use tracing::debug;

use crate::domain::{DBC_FRACTION, Sample, SigmoidFit, SigmoidParams};
use crate::fit::{FitError, SolverOptions, levenberg_marquardt};
use crate::math::quality_score;
use crate::models::{Sigmoid, loading_at_fraction, predict};

/// Fit `y = 1/(1 + exp(-k(x - x0)))` to `samples`, starting from `guess`.
///
/// The guess must be reasonably close to the optimum; the default
/// ([`SigmoidParams::default`]) suits loadings in the 0–200 range.
pub fn fit_sigmoid(
    samples: &[Sample],
    guess: SigmoidParams,
    opts: &SolverOptions,
) -> Result<SigmoidFit, FitError> {
    let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.y).collect();

    let solution = levenberg_marquardt(&Sigmoid, &xs, &ys, &[guess.k, guess.x0], opts)?;
    let params = SigmoidParams::new(solution.params[0], solution.params[1]);

    let y_hat: Vec<f64> = xs.iter().map(|&x| predict(&params, x)).collect();
    let quality = quality_score(&ys, &y_hat).ok_or(FitError::ZeroVariance)?;

    let dbc_10 = loading_at_fraction(&params, DBC_FRACTION);
    if !dbc_10.is_finite() {
        return Err(FitError::NonFinite);
    }

    debug!(
        k = params.k,
        x0 = params.x0,
        dbc_10,
        quality,
        iterations = solution.iterations,
        "sigmoid fit complete"
    );

    Ok(SigmoidFit {
        params,
        dbc_10,
        quality,
        iterations: solution.iterations,
        sse: solution.sse,
    })
}
