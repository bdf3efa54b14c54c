//! Coupled time-marching loop for the molten-salt reactor model.
//!
//! Provides:
//! - `Simulation`: all module state plus the fixed-step coupling sequence
//! - `CoreStructure`: the 1D or 2D conduction model the loop drives
//! - `run`: drive a simulation for a number of steps with a per-step observer

pub mod error;
pub mod sim;
pub mod structure;

pub use error::{SimError, SimResult};
pub use sim::{RunSummary, Simulation, StepOutput, run};
pub use structure::CoreStructure;
