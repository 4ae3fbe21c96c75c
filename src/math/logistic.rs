//! Numerically stable logistic helpers.
//!
//! The breakthrough model evaluates `1 / (1 + exp(-z))` for `z = k·(x - x0)`.
//! During early solver iterations `z` can be large in magnitude:
//!
//! - for `z ≪ 0`, `exp(-z)` overflows to `inf`; we use `exp(z) / (1 + exp(z))`
//! - for `z ≫ 0`, the textbook form is already safe
//!
//! Both branches agree at `z = 0` and never produce NaN for finite `z`.

/// Standard logistic function `σ(z) = 1 / (1 + e^{-z})`.
pub fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the logistic function, `σ(z)·(1 - σ(z))`.
pub fn logistic_slope(z: f64) -> f64 {
    let s = logistic(z);
    s * (1.0 - s)
}

/// Inverse of the logistic function, `ln(p / (1 - p))`.
///
/// Returns `±inf` at `p = 1` / `p = 0` and NaN outside `[0, 1]`.
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_is_finite_at_extremes() {
        for &z in &[-1e6, -745.0, -50.0, 0.0, 50.0, 745.0, 1e6] {
            let s = logistic(z);
            assert!(s.is_finite(), "σ({z}) = {s}");
            assert!((0.0..=1.0).contains(&s));
            assert!(logistic_slope(z).is_finite());
        }
        assert_eq!(logistic(0.0), 0.5);
    }

    #[test]
    fn logit_inverts_logistic() {
        for &p in &[0.01, 0.1, 0.5, 0.9, 0.99] {
            let z = logit(p);
            assert!((logistic(z) - p).abs() < 1e-12);
        }
        assert!((logit(0.1) + 9.0_f64.ln()).abs() < 1e-12);
    }
}
