//! Error types for kinetics construction.

use ms_core::MsError;
use thiserror::Error;

pub type KineticsResult<T> = Result<T, KineticsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KineticsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Group data error: {0}")]
    Groups(#[from] MsError),
}
