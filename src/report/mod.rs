//! Reporting utilities: per-sample residuals and formatted terminal output.

use crate::domain::{Sample, SigmoidFit};
use crate::models::predict;

pub mod format;

pub use format::*;

/// A sample alongside the fitted curve's value at its loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSample {
    pub sample: Sample,
    pub y_fit: f64,
    pub residual: f64,
}

/// Compute fitted values and residuals for each sample, in input order.
pub fn compute_residuals(samples: &[Sample], fit: &SigmoidFit) -> Vec<FittedSample> {
    samples
        .iter()
        .map(|&sample| {
            let y_fit = predict(&fit.params, sample.x);
            FittedSample {
                sample,
                y_fit,
                residual: sample.y - y_fit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SigmoidParams;

    #[test]
    fn compute_residuals_basic() {
        let fit = SigmoidFit {
            params: SigmoidParams::new(0.4, 70.0),
            dbc_10: 64.5,
            quality: 1.0,
            iterations: 0,
            sse: 0.0,
        };
        let samples = [Sample::new(70.0, 0.6), Sample::new(70.0, 0.5)];

        let residuals = compute_residuals(&samples, &fit);
        assert_eq!(residuals.len(), 2);
        assert!((residuals[0].y_fit - 0.5).abs() < 1e-12);
        assert!((residuals[0].residual - 0.1).abs() < 1e-12);
        assert!(residuals[1].residual.abs() < 1e-12);
    }
}
