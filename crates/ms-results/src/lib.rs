//! ms-results: in-memory recording and on-disk run storage.

pub mod hash;
pub mod recorder;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use recorder::Recorder;
pub use store::{RunData, RunStore};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Inconsistent series: {what}")]
    InconsistentSeries { what: String },
}
