//! Run storage API.
//!
//! Each run lives in `<root>/<run_id>/` as:
//! - `manifest.json`
//! - `timeseries.jsonl`: one [`TimeseriesRecord`] per line
//! - `fields.jsonl`: one [`FieldRecord`] per line
//! - `control_log.jsonl`: one control event per line

use crate::types::{FieldRecord, RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use ms_controls::ControlEvent;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST: &str = "manifest.json";
const TIMESERIES: &str = "timeseries.jsonl";
const FIELDS: &str = "fields.jsonl";
const CONTROL_LOG: &str = "control_log.jsonl";

/// Everything saved for one run besides the manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunData {
    pub timeseries: Vec<TimeseriesRecord>,
    pub fields: Vec<FieldRecord>,
    pub control_log: Vec<ControlEvent>,
}

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> ResultsResult<()> {
    let mut content = String::new();
    for record in records {
        content.push_str(&serde_json::to_string(record)?);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> ResultsResult<Vec<T>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(line)?);
        }
    }
    Ok(records)
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST).exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, data: &RunData) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST), manifest_json)?;

        write_jsonl(&run_dir.join(TIMESERIES), &data.timeseries)?;
        write_jsonl(&run_dir.join(FIELDS), &data.fields)?;
        write_jsonl(&run_dir.join(CONTROL_LOG), &data.control_log)?;
        Ok(())
    }

    fn existing(&self, run_id: &str, file: &str) -> ResultsResult<PathBuf> {
        let path = self.run_dir(run_id).join(file);
        if path.exists() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let content = fs::read_to_string(self.existing(run_id, MANIFEST)?)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        read_jsonl(&self.existing(run_id, TIMESERIES)?)
    }

    pub fn load_fields(&self, run_id: &str) -> ResultsResult<Vec<FieldRecord>> {
        read_jsonl(&self.existing(run_id, FIELDS)?)
    }

    pub fn load_control_log(&self, run_id: &str) -> ResultsResult<Vec<ControlEvent>> {
        read_jsonl(&self.existing(run_id, CONTROL_LOG)?)
    }

    pub fn load_run(&self, run_id: &str) -> ResultsResult<(RunManifest, RunData)> {
        let manifest = self.load_manifest(run_id)?;
        let data = RunData {
            timeseries: self.load_timeseries(run_id)?,
            fields: self.load_fields(run_id)?,
            control_log: self.load_control_log(run_id)?,
        };
        Ok((manifest, data))
    }

    /// Manifests of every stored run for `case_name`.
    pub fn list_runs(&self, case_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    if manifest.case_name == case_name {
                        runs.push(manifest);
                    }
                }
            }
        }
        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
