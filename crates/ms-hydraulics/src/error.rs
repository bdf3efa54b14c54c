//! Error types for hydraulics operations.

use ms_core::MsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("State error: {0}")]
    State(#[from] MsError),
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;
