//! Application service layer shared by front ends.
//!
//! Loads cards, runs the coupled transient into a run store and evaluates the
//! outlet-temperature response.

pub mod error;
pub mod metrics;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use metrics::{ControlMetrics, DEFAULT_TOLERANCE, evaluate};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, ensure_run, execute_card, list_runs, load_run,
    validate_card_file,
};
