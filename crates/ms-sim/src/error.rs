//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while building or advancing the coupled model.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite {what} at step {step}: {value}")]
    NonFinite {
        what: &'static str,
        value: f64,
        step: u64,
    },

    #[error("Conduction error: {0}")]
    Solver(#[from] ms_solver::SolverError),

    #[error("Hydraulics error: {0}")]
    Hydraulics(#[from] ms_hydraulics::HydraulicsError),

    #[error("Kinetics error: {0}")]
    Kinetics(#[from] ms_kinetics::KineticsError),

    #[error("Control error: {0}")]
    Control(#[from] ms_controls::ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
