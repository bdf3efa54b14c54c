//! Error types for solver operations.

use ms_core::MsError;
use thiserror::Error;

/// Errors raised while assembling or solving conduction systems.
///
/// Only structural problems are reported. A system that is not diagonally
/// dominant is solved anyway and may produce meaningless values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Field error: {0}")]
    Field(#[from] MsError),
}

pub type SolverResult<T> = Result<T, SolverError>;
