//! Curve model implementations.
//!
//! The solver only needs two primitives from a model, so they are expressed as
//! a small trait and the solver stays generic over it:
//! - predict `y(x)` for a parameter vector (for residuals/plots)
//! - fill the Jacobian row `∂y/∂p` at `x` (for the Levenberg–Marquardt step)

pub mod sigmoid;

pub use sigmoid::*;

/// A curve `y = f(x; p)` with analytic parameter derivatives.
pub trait CurveModel {
    /// Number of free parameters.
    fn param_count(&self) -> usize;

    /// Evaluate the curve at `x`.
    fn predict(&self, params: &[f64], x: f64) -> f64;

    /// Write `∂f/∂p_j` at `x` into `out[j]`.
    ///
    /// # Panics
    /// Implementations may panic if `out.len() != self.param_count()`.
    fn fill_jacobian_row(&self, params: &[f64], x: f64, out: &mut [f64]);
}
