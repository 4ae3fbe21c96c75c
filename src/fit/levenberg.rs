//! Levenberg–Marquardt nonlinear least squares.
//!
//! Given:
//! - loadings `x_i`
//! - observed values `y_i`
//! - a [`CurveModel`] with analytic Jacobian
//! - a starting parameter vector
//!
//! we iterate damped Gauss–Newton steps
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr,   r_i = y_i - f(x_i; p)
//! ```
//!
//! accepting a step only if it lowers the SSE. Accepted steps shrink `λ`
//! (towards Gauss–Newton), rejected steps grow it (towards gradient descent).
//!
//! Convergence tests, checked in this order:
//! - SSE is numerically zero
//! - gradient cosine `max_j |g_j| / (‖J_j‖·‖r‖)` below `gtol`
//! - accepted step small relative to the parameters (`xtol`)
//! - relative SSE reduction below `ftol`
//!
//! The first two are checked at the current point before the iteration cap, so
//! an already-optimal start converges with zero iterations.
//!
//! After convergence the Jacobian must have full column rank, otherwise the
//! parameters are not identifiable and the fit is rejected.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::fit::FitError;
use crate::math::{has_full_column_rank, solve_least_squares};
use crate::models::CurveModel;

/// SSE at or below which the fit is treated as exact.
const ZERO_SSE: f64 = 1e-30;
/// Floor applied to `diag(JᵀJ)` so saturated columns still get damped.
const DIAG_FLOOR: f64 = 1e-300;
const MIN_DAMPING: f64 = 1e-15;
const MAX_DAMPING: f64 = 1e16;
/// Gradient cosine accepted as stationary once damping is exhausted.
const STALL_GTOL: f64 = 1e-6;

/// Tuning knobs for [`levenberg_marquardt`].
///
/// `ftol` and `xtol` default to MINPACK's `sqrt(f64::EPSILON)`. Much tighter
/// values may never trigger when the SSE is flat along one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub max_iterations: usize,
    pub ftol: f64,
    pub xtol: f64,
    /// Threshold on the gradient cosine, checked at every iterate.
    pub gtol: f64,
    /// Initial `λ` as a multiple of `max diag(JᵀJ)`.
    pub initial_damping: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            ftol: 1.49e-8,
            xtol: 1.49e-8,
            gtol: 1e-10,
            initial_damping: 1e-3,
        }
    }
}

/// Which convergence test ended the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    ZeroResidual,
    SmallGradient,
    SmallStep,
    SmallReduction,
    /// No further descent was possible but the point is stationary.
    Stationary,
}

/// A converged solution.
#[derive(Debug, Clone)]
pub struct Solution {
    pub params: Vec<f64>,
    pub sse: f64,
    pub iterations: usize,
    pub termination: Termination,
}

/// Residuals and Jacobian at one parameter vector.
struct Linearization {
    residuals: DVector<f64>,
    jacobian: DMatrix<f64>,
    sse: f64,
}

/// Minimize `Σ (y_i - f(x_i; p))²` over `p`, starting from `initial`.
pub fn levenberg_marquardt<M: CurveModel>(
    model: &M,
    xs: &[f64],
    ys: &[f64],
    initial: &[f64],
    opts: &SolverOptions,
) -> Result<Solution, FitError> {
    let p = model.param_count();
    let n = xs.len();

    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch { x: xs.len(), y: ys.len() });
    }
    if n < p {
        return Err(FitError::TooFewSamples { n, required: p });
    }
    if let Some(index) = xs
        .iter()
        .zip(ys.iter())
        .position(|(x, y)| !(x.is_finite() && y.is_finite()))
    {
        return Err(FitError::NonFiniteInput { index });
    }
    if initial.len() != p || initial.iter().any(|v| !v.is_finite()) {
        return Err(FitError::InvalidGuess { expected: p });
    }

    let mut params = DVector::from_column_slice(initial);
    let mut lin = linearize(model, xs, ys, params.as_slice()).ok_or(FitError::NonFinite)?;
    let mut damping: Option<f64> = None;
    let mut iter = 0;

    loop {
        if lin.sse <= ZERO_SSE {
            return finish(params, lin, iter, Termination::ZeroResidual);
        }

        let jt = lin.jacobian.transpose();
        let jtj = &jt * &lin.jacobian;
        let gradient = &jt * &lin.residuals;

        let cosine = gradient_cosine(&lin, &gradient);
        if cosine <= opts.gtol {
            return finish(params, lin, iter, Termination::SmallGradient);
        }
        if iter >= opts.max_iterations {
            return Err(FitError::MaxIterations { iterations: iter });
        }
        iter += 1;

        let diag: Vec<f64> = (0..p).map(|j| jtj[(j, j)].max(DIAG_FLOOR)).collect();
        let mut lambda = damping.unwrap_or_else(|| {
            let max_diag = diag.iter().copied().fold(0.0_f64, f64::max);
            (opts.initial_damping * max_diag).max(MIN_DAMPING)
        });

        // Inner loop: raise damping until a step lowers the SSE.
        loop {
            let mut a = jtj.clone();
            for (j, d) in diag.iter().enumerate() {
                a[(j, j)] += lambda * d;
            }

            let candidate = solve_least_squares(&a, &gradient).and_then(|step| {
                let trial = &params + &step;
                linearize(model, xs, ys, trial.as_slice()).map(|next| (step, trial, next))
            });

            match candidate {
                Some((step, trial, next)) if next.sse < lin.sse => {
                    let reduction = lin.sse - next.sse;
                    let old_sse = lin.sse;
                    let small_step = step.amax() <= opts.xtol * (params.amax() + opts.xtol);

                    debug!(
                        iter,
                        lambda,
                        sse = next.sse,
                        params = ?trial.as_slice(),
                        "accepted step"
                    );

                    params = trial;
                    lin = next;
                    lambda = (lambda / 10.0).max(MIN_DAMPING);
                    damping = Some(lambda);

                    if small_step {
                        return finish(params, lin, iter, Termination::SmallStep);
                    }
                    if reduction <= opts.ftol * old_sse {
                        return finish(params, lin, iter, Termination::SmallReduction);
                    }
                    break;
                }
                _ => {
                    lambda *= 10.0;
                    if lambda > MAX_DAMPING {
                        if cosine <= STALL_GTOL {
                            return finish(params, lin, iter, Termination::Stationary);
                        }
                        return Err(FitError::Stalled { iterations: iter });
                    }
                }
            }
        }
    }
}

fn finish(
    params: DVector<f64>,
    lin: Linearization,
    iterations: usize,
    termination: Termination,
) -> Result<Solution, FitError> {
    if !has_full_column_rank(&lin.jacobian) {
        return Err(FitError::SingularJacobian);
    }
    debug!(iterations, sse = lin.sse, ?termination, "solver converged");
    Ok(Solution {
        params: params.iter().copied().collect(),
        sse: lin.sse,
        iterations,
        termination,
    })
}

/// Evaluate residuals, Jacobian and SSE; `None` if anything is non-finite.
fn linearize<M: CurveModel>(model: &M, xs: &[f64], ys: &[f64], params: &[f64]) -> Option<Linearization> {
    let n = xs.len();
    let p = model.param_count();

    let mut residuals = DVector::<f64>::zeros(n);
    let mut jacobian = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];

    for i in 0..n {
        residuals[i] = ys[i] - model.predict(params, xs[i]);
        model.fill_jacobian_row(params, xs[i], &mut row);
        for j in 0..p {
            jacobian[(i, j)] = row[j];
        }
    }

    let sse = residuals.norm_squared();
    if !sse.is_finite() || jacobian.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Linearization {
        residuals,
        jacobian,
        sse,
    })
}

/// Largest cosine between the residual vector and a Jacobian column.
///
/// Scale free, so the same tolerance works for loadings in g/L or mg/mL.
fn gradient_cosine(lin: &Linearization, gradient: &DVector<f64>) -> f64 {
    let r_norm = lin.residuals.norm();
    if r_norm == 0.0 {
        return 0.0;
    }
    lin.jacobian
        .column_iter()
        .zip(gradient.iter())
        .map(|(col, g)| {
            let c = col.norm();
            if c == 0.0 { 0.0 } else { g.abs() / (c * r_norm) }
        })
        .fold(0.0_f64, f64::max)
}
