//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A controller produced a command that cannot be sent to an actuator.
    #[error("Non-finite command for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// Reject NaN and infinite commands.
pub(crate) fn finite_command(value: f64, what: &'static str) -> ControlResult<f64> {
    ms_core::ensure_finite(value, what).map_err(|_| ControlError::NonFinite { what, value })
}
