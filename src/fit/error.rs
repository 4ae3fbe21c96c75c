use thiserror::Error;

/// Why a least-squares fit could not produce usable parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Fewer observations than free parameters.
    #[error("need at least {required} samples to fit {required} parameters, got {n}")]
    TooFewSamples { n: usize, required: usize },

    /// x and y series differ in length.
    #[error("x and y columns differ in length ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    /// An observation is NaN or infinite.
    #[error("sample {index} is not a finite number")]
    NonFiniteInput { index: usize },

    /// The starting point has the wrong dimension or a non-finite entry.
    #[error("initial guess must have {expected} finite parameters")]
    InvalidGuess { expected: usize },

    /// The iteration cap was reached before any convergence test passed.
    #[error("did not converge within {iterations} iterations")]
    MaxIterations { iterations: usize },

    /// Damping grew without bound and no step reduced the residual.
    #[error("no descent step found after {iterations} iterations (damping exhausted)")]
    Stalled { iterations: usize },

    /// The Jacobian at the solution is rank deficient.
    #[error("singular Jacobian at the solution; parameters are not identifiable from these samples")]
    SingularJacobian,

    /// Residuals or parameters overflowed.
    #[error("non-finite value encountered during optimization")]
    NonFinite,

    /// Every observed y is identical, so the quality score is undefined.
    #[error("observed breakthrough values have zero variance")]
    ZeroVariance,
}
