//! Two-parameter logistic breakthrough curve.
//!
//! ```text
//! y(x) = 1 / (1 + exp(-k·(x - x0)))
//! ```
//!
//! Parameter vector layout is `[k, x0]`.

use crate::domain::SigmoidParams;
use crate::math::{logistic, logistic_slope, logit};
use crate::models::CurveModel;

/// The logistic breakthrough model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl CurveModel for Sigmoid {
    fn param_count(&self) -> usize {
        2
    }

    fn predict(&self, params: &[f64], x: f64) -> f64 {
        logistic(params[0] * (x - params[1]))
    }

    fn fill_jacobian_row(&self, params: &[f64], x: f64, out: &mut [f64]) {
        let (k, x0) = (params[0], params[1]);
        let ds = logistic_slope(k * (x - x0));
        out[0] = ds * (x - x0);
        out[1] = -k * ds;
    }
}

/// Predict the breakthrough fraction at loading `x`.
pub fn predict(params: &SigmoidParams, x: f64) -> f64 {
    Sigmoid.predict(&[params.k, params.x0], x)
}

/// Loading at which the curve reaches `fraction`: `x0 + logit(fraction)/k`.
///
/// For `fraction = 0.1` this is `x0 - ln(9)/k`.
pub fn loading_at_fraction(params: &SigmoidParams, fraction: f64) -> f64 {
    params.x0 + logit(fraction) / params.k
}

/// Sample the curve on `n` evenly spaced loadings over `[x_min, x_max]`.
pub fn sample_curve(params: &SigmoidParams, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, predict(params, x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_half_breakthrough() {
        let p = SigmoidParams::new(0.4, 70.0);
        assert!((predict(&p, 70.0) - 0.5).abs() < 1e-15);
        assert!(predict(&p, 0.0) < 1e-10);
        assert!(predict(&p, 200.0) > 1.0 - 1e-10);
    }

    #[test]
    fn dbc_10_closed_form() {
        let p = SigmoidParams::new(0.4, 70.0);
        let x = loading_at_fraction(&p, 0.1);
        assert!((x - (70.0 - 9.0_f64.ln() / 0.4)).abs() < 1e-12);
        assert!((x - 64.507).abs() < 1e-3);
        assert!((predict(&p, x) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn negative_steepness_decreases() {
        let p = SigmoidParams::new(-0.2, 50.0);
        assert!(predict(&p, 10.0) > predict(&p, 90.0));
        // The 10% point moves to the right of the midpoint for a falling curve.
        assert!(loading_at_fraction(&p, 0.1) > 50.0);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let params = [0.3, 60.0];
        let mut row = [0.0; 2];
        for &x in &[20.0, 55.0, 60.0, 72.5, 140.0] {
            Sigmoid.fill_jacobian_row(&params, x, &mut row);
            for j in 0..2 {
                let h = 1e-6 * params[j].abs().max(1.0);
                let mut hi = params;
                let mut lo = params;
                hi[j] += h;
                lo[j] -= h;
                let fd = (Sigmoid.predict(&hi, x) - Sigmoid.predict(&lo, x)) / (2.0 * h);
                assert!((row[j] - fd).abs() < 1e-7, "x={x} j={j}: {} vs {fd}", row[j]);
            }
        }
    }

    #[test]
    fn sample_curve_spans_range() {
        let p = SigmoidParams::default();
        let c = sample_curve(&p, -1.0, 200.0, 200);
        assert_eq!(c.len(), 200);
        assert_eq!(c[0].0, -1.0);
        assert!((c[199].0 - 200.0).abs() < 1e-12);
    }
}
