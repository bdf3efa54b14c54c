//! In-memory scalar series and array snapshots.

use crate::types::{FieldRecord, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::collections::BTreeMap;

/// Accumulates named scalar series and array snapshots during a run.
///
/// Optional key filters restrict what is kept; recording an unlisted key is a
/// no-op. An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    scalar_keys: Vec<String>,
    array_keys: Vec<String>,
    scalars: BTreeMap<String, Vec<f64>>,
    arrays: BTreeMap<String, Vec<Vec<f64>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(scalar_keys: Vec<String>, array_keys: Vec<String>) -> Self {
        Self {
            scalar_keys,
            array_keys,
            ..Self::default()
        }
    }

    fn keeps(filter: &[String], key: &str) -> bool {
        filter.is_empty() || filter.iter().any(|k| k == key)
    }

    pub fn record_scalar(&mut self, key: &str, value: f64) {
        if Self::keeps(&self.scalar_keys, key) {
            self.scalars.entry(key.to_string()).or_default().push(value);
        }
    }

    pub fn record_array(&mut self, key: &str, values: Vec<f64>) {
        if Self::keeps(&self.array_keys, key) {
            self.arrays.entry(key.to_string()).or_default().push(values);
        }
    }

    pub fn scalar(&self, key: &str) -> Option<&[f64]> {
        self.scalars.get(key).map(Vec::as_slice)
    }

    pub fn array(&self, key: &str) -> Option<&[Vec<f64>]> {
        self.arrays.get(key).map(Vec::as_slice)
    }

    pub fn scalars(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.scalars
    }

    pub fn arrays(&self) -> &BTreeMap<String, Vec<Vec<f64>>> {
        &self.arrays
    }

    /// Drop all recorded data; filters are kept.
    pub fn reset(&mut self) {
        self.scalars.clear();
        self.arrays.clear();
    }

    /// Length shared by every scalar series.
    pub fn len(&self) -> ResultsResult<usize> {
        let mut lengths = self.scalars.iter().map(|(k, v)| (k, v.len()));
        let Some((_, len)) = lengths.next() else {
            return Ok(0);
        };
        for (key, other) in lengths {
            if other != len {
                return Err(ResultsError::InconsistentSeries {
                    what: format!("{key} has {other} samples, expected {len}"),
                });
            }
        }
        Ok(len)
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.values().all(Vec::is_empty) && self.arrays.values().all(Vec::is_empty)
    }

    /// One row per step with every scalar series.
    pub fn timeseries(&self) -> ResultsResult<Vec<TimeseriesRecord>> {
        let len = self.len()?;
        Ok((0..len)
            .map(|index| TimeseriesRecord {
                index,
                values: self
                    .scalars
                    .iter()
                    .map(|(k, v)| (k.clone(), v[index]))
                    .collect(),
            })
            .collect())
    }

    /// Every snapshot in recording order, grouped by name.
    pub fn fields(&self) -> Vec<FieldRecord> {
        self.arrays
            .iter()
            .flat_map(|(name, snapshots)| {
                snapshots.iter().enumerate().map(move |(index, values)| FieldRecord {
                    index,
                    name: name.clone(),
                    values: values.clone(),
                })
            })
            .collect()
    }

    /// Rebuild a recorder from stored rows.
    pub fn from_records(timeseries: &[TimeseriesRecord], fields: &[FieldRecord]) -> Self {
        let mut recorder = Self::new();
        for row in timeseries {
            for (key, value) in &row.values {
                recorder.record_scalar(key, *value);
            }
        }
        for field in fields {
            recorder.record_array(&field.name, field.values.clone());
        }
        recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_drop_unlisted_keys() {
        let mut rec = Recorder::with_keys(vec!["n".to_string()], vec![]);
        rec.record_scalar("n", 1.0);
        rec.record_scalar("rho", 0.0);
        rec.record_array("T_core", vec![900.0; 3]);
        assert_eq!(rec.scalar("n"), Some(&[1.0][..]));
        assert_eq!(rec.scalar("rho"), None);
        assert_eq!(rec.array("T_core").map(|a| a.len()), Some(1));
    }

    #[test]
    fn reset_clears_data() {
        let mut rec = Recorder::new();
        rec.record_scalar("time", 0.0);
        rec.record_array("T_core", vec![1.0]);
        assert!(!rec.is_empty());
        rec.reset();
        assert!(rec.is_empty());
        assert_eq!(rec.len().unwrap(), 0);
    }

    #[test]
    fn timeseries_rows_align_series() {
        let mut rec = Recorder::new();
        for i in 0..3 {
            rec.record_scalar("time", i as f64 * 0.1);
            rec.record_scalar("n", 1.0 + i as f64);
        }
        let rows = rec.timeseries().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].values["n"], 3.0);
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn ragged_series_are_reported() {
        let mut rec = Recorder::new();
        rec.record_scalar("time", 0.0);
        rec.record_scalar("time", 0.1);
        rec.record_scalar("n", 1.0);
        assert!(matches!(
            rec.timeseries(),
            Err(ResultsError::InconsistentSeries { .. })
        ));
    }

    #[test]
    fn rebuilds_from_rows() {
        let mut rec = Recorder::new();
        rec.record_scalar("time", 0.0);
        rec.record_scalar("time", 0.5);
        rec.record_array("T_core", vec![1.0, 2.0]);
        let rebuilt = Recorder::from_records(&rec.timeseries().unwrap(), &rec.fields());
        assert_eq!(rebuilt, rec);
    }
}
