//! Small dense least-squares solves.
//!
//! The Levenberg–Marquardt step solves a damped normal-equation system
//!
//! ```text
//! (JᵀJ + λ·D) δ = Jᵀr
//! ```
//!
//! whose dimension equals the parameter count (two for the breakthrough
//! model). We solve it via SVD so that a rank-deficient system still yields
//! the minimum-norm step instead of panicking. (Nalgebra's `QR::solve` is
//! intended for square, well-conditioned systems.)

use nalgebra::{DMatrix, DVector};

/// Relative singular-value cutoff below which a matrix is treated as rank deficient.
pub const RANK_RTOL: f64 = 1e-12;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Whether the columns of `x` are linearly independent (numerically).
pub fn has_full_column_rank(x: &DMatrix<f64>) -> bool {
    if x.nrows() < x.ncols() || x.iter().any(|v| !v.is_finite()) {
        return false;
    }
    let sv = x.singular_values();
    let max = sv.iter().copied().fold(0.0_f64, f64::max);
    let min = sv.iter().copied().fold(f64::INFINITY, f64::min);
    max > 0.0 && min > max * RANK_RTOL
}
