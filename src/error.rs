//! Application error type.
//!
//! The regression engine itself never fails (degenerate numeric input flows
//! through as NaN/inf). Errors only arise in the outer layers: file I/O,
//! argument validation, and sample generation. Each error carries the process
//! exit code used by the `cfit` binary:
//!
//! - `2`: bad input (files, CSV schema, flags)
//! - `3`: insufficient data
//! - `4`: numeric failure surfaced by an outer layer

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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
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
