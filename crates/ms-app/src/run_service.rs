//! Run execution and caching service.

use std::path::{Path, PathBuf};

use ms_project::InputCard;
use ms_results::{
    Recorder, RunData, RunManifest, RunStore, TimeseriesRecord, compute_run_id, timestamp_now,
};
use ms_sim::{Simulation, run};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::metrics::{self, ControlMetrics, DEFAULT_TOLERANCE};

/// Version folded into every run id.
pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running a card.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Replaces `meta.t_end`.
    pub t_end: Option<f64>,
    /// Replaces `recorder.output_dir`.
    pub output_dir: Option<PathBuf>,
    /// Settling band for the outlet-temperature metrics.
    pub tolerance: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: SOLVER_VERSION.to_string(),
            t_end: None,
            output_dir: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub card_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub output_dir: PathBuf,
    pub loaded_from_cache: bool,
    /// Outlet temperature against `control.T_ref`.
    pub metrics: ControlMetrics,
}

/// Load and validate a card without running it.
pub fn validate_card_file(path: &Path) -> AppResult<InputCard> {
    ms_project::load_card(path).map_err(|source| AppError::Card {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the card at `request.card_path` and run it, or reuse a stored run with
/// the same id.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let card = validate_card_file(request.card_path)?;
    execute_card(card, &request.options)
}

/// Run a validated card and save everything it records.
pub fn execute_card(mut card: InputCard, options: &RunOptions) -> AppResult<RunResponse> {
    if let Some(t_end) = options.t_end {
        if !(t_end > 0.0 && t_end.is_finite()) {
            return Err(AppError::InvalidInput(format!(
                "t_end must be positive, got {t_end}"
            )));
        }
        card.meta.t_end = t_end;
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&card.recorder.output_dir));
    let store = RunStore::new(output_dir.clone())?;
    let run_id = compute_run_id(&card, &options.solver_version);
    let reference = card.control.t_ref;

    if options.use_cache && store.has_run(&run_id) {
        info!(run_id = %run_id, "reusing stored run");
        let (manifest, data) = store.load_run(&run_id)?;
        let metrics = outlet_metrics(&data.timeseries, reference, options.tolerance)?;
        return Ok(RunResponse {
            run_id,
            manifest,
            output_dir,
            loaded_from_cache: true,
            metrics,
        });
    }

    let mut sim = Simulation::from_card(&card)?;
    let mut recorder = Recorder::with_keys(
        card.recorder.scalar_keys.clone(),
        card.recorder.array_keys.clone(),
    );
    let mut control_log = Vec::new();
    let mut times = Vec::new();
    let mut outlet = Vec::new();

    let summary = run(&mut sim, card.steps() as u64, |out, sim| {
        recorder.record_scalar("time", out.time);
        recorder.record_scalar("n", out.n);
        recorder.record_scalar("T_out", out.outlet_temperature);
        recorder.record_scalar("rho", out.reactivity);
        recorder.record_scalar("U", out.heat_removal);
        recorder.record_scalar("scram", if out.scram { 1.0 } else { 0.0 });
        if let Some(decay_heat) = out.decay_heat {
            recorder.record_scalar("decay_heat", decay_heat);
        }
        recorder.record_array("T_core", sim.core_snapshot());
        control_log.extend(sim.drain_control_log());

        times.push(out.time);
        outlet.push(out.outlet_temperature);
    })?;

    let manifest = RunManifest {
        run_id: run_id.clone(),
        case_name: card.meta.case_name.clone(),
        timestamp: timestamp_now(),
        dt_s: card.dt(),
        t_end_s: card.meta.t_end,
        steps: summary.steps,
        solver_version: options.solver_version.clone(),
        core_shape: sim.structure().shape(),
        trip_time_s: summary.trip_time,
    };
    let data = RunData {
        timeseries: recorder.timeseries()?,
        fields: recorder.fields(),
        control_log,
    };
    store.save_run(&manifest, &data)?;
    info!(run_id = %run_id, dir = %output_dir.display(), "run saved");

    let metrics = metrics::evaluate(&times, &outlet, reference, options.tolerance)?;
    Ok(RunResponse {
        run_id,
        manifest,
        output_dir,
        loaded_from_cache: false,
        metrics,
    })
}

/// Metrics from stored rows; empty when time or outlet temperature were
/// filtered out of the recording.
fn outlet_metrics(
    rows: &[TimeseriesRecord],
    reference: f64,
    tolerance: f64,
) -> AppResult<ControlMetrics> {
    let series: Option<(Vec<f64>, Vec<f64>)> = rows
        .iter()
        .map(|row| Some((*row.values.get("time")?, *row.values.get("T_out")?)))
        .collect();
    match series {
        Some((times, outlet)) => metrics::evaluate(&times, &outlet, reference, tolerance),
        None => Ok(ControlMetrics::default()),
    }
}

/// Stored runs of `case_name`, most recent first.
pub fn list_runs(output_dir: &Path, case_name: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::new(output_dir.to_path_buf())?;
    let mut runs = store.list_runs(case_name)?;
    runs.reverse();
    Ok(runs)
}

pub fn load_run(output_dir: &Path, run_id: &str) -> AppResult<(RunManifest, RunData)> {
    let store = RunStore::new(output_dir.to_path_buf())?;
    Ok(store.load_run(run_id)?)
}
