//! Process-level error type and exit codes.
//!
//! Every failure that reaches `main` is an [`AppError`]: a message for stderr
//! plus the exit code the shell sees. Lower layers keep their own typed errors
//! (see [`crate::fit::FitError`]) and convert at the pipeline boundary.

/// Run completed (also used when the quality gate rejects the fit).
pub const SUCCESS: u8 = 0;
/// Input could not be read or an output could not be written.
pub const IO_ERROR: u8 = 1;
/// Input was readable but is not a valid two-column numeric table.
pub const INVALID_DATA: u8 = 2;
/// Command-line arguments could not be parsed.
pub const SYNTAX_ERROR: u8 = 3;
/// The optimizer failed to produce a usable fit.
pub const FIT_ERROR: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(IO_ERROR, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(INVALID_DATA, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<crate::fit::FitError> for AppError {
    fn from(err: crate::fit::FitError) -> Self {
        Self::new(FIT_ERROR, format!("Numerical fit error: {err}"))
    }
}
