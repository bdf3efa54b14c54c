//! Result data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RunId = String;

/// Current UTC time in RFC 3339, as stored in manifests.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub case_name: String,
    /// RFC 3339 wall-clock time of the save.
    pub timestamp: String,
    pub dt_s: f64,
    pub t_end_s: f64,
    pub steps: u64,
    pub solver_version: String,
    /// Shape of each `T_core` snapshot: `[len]` or `[axial, radial]`.
    #[serde(default)]
    pub core_shape: Vec<usize>,
    /// Time at which the trip activated, if it did.
    #[serde(default)]
    pub trip_time_s: Option<f64>,
}

/// Every recorded scalar for one step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub index: usize,
    pub values: BTreeMap<String, f64>,
}

/// One array snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRecord {
    pub index: usize,
    pub name: String,
    pub values: Vec<f64>,
}
