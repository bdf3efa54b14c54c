//! Error types for the service layer.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load card {path}: {source}")]
    Card {
        path: PathBuf,
        source: ms_project::ProjectError,
    },

    #[error("Project error: {0}")]
    Project(#[from] ms_project::ProjectError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] ms_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] ms_results::ResultsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
