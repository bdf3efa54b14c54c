use ms_app::{AppError, RunOptions, RunRequest, ensure_run, execute_card, list_runs, load_run};
use ms_project::parse_yaml;
use std::path::PathBuf;

// dt = 2^-6 and t_end = 2^-3 give exactly eight steps.
const CARD: &str = r#"
meta:
  case_name: service_test
  t_end: 0.125
neutronics:
  beta_i: [0.0065]
  lambda_i: [0.08]
  Lambda: 1.0e-4
  T_c: 1.0e9
  tau: 0.05
thermal_1d: {}
thermal_2d: {}
hydraulics:
  N: 5
  dr: 0.03125
  dt: 0.015625
control: {}
recorder: {}
"#;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ms_app_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn options(dir: &PathBuf) -> RunOptions {
    RunOptions {
        output_dir: Some(dir.clone()),
        ..RunOptions::default()
    }
}

#[test]
fn run_is_saved_then_reused() {
    let dir = temp_dir("cache");
    let card = parse_yaml(CARD).unwrap();

    let first = execute_card(card.clone(), &options(&dir)).unwrap();
    assert!(!first.loaded_from_cache);
    assert_eq!(first.manifest.steps, 8);
    assert_eq!(first.manifest.case_name, "service_test");
    assert_eq!(first.manifest.core_shape, vec![5]);
    assert_eq!(first.manifest.trip_time_s, None);

    let (_, data) = load_run(&dir, &first.run_id).unwrap();
    assert_eq!(data.timeseries.len(), 8);
    assert_eq!(data.fields.len(), 8);
    assert!(data.timeseries[0].values.contains_key("T_out"));
    assert!(data.timeseries[0].values.contains_key("scram"));
    assert!(!data.timeseries[0].values.contains_key("decay_heat"));
    assert!(!data.control_log.is_empty());
    assert!(first.metrics.steady_state_error.is_some());

    let second = execute_card(card, &options(&dir)).unwrap();
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert_eq!(second.metrics, first.metrics);

    let runs = list_runs(&dir, "service_test").unwrap();
    assert_eq!(runs.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn end_time_override_changes_the_run() {
    let dir = temp_dir("override");
    let card = parse_yaml(CARD).unwrap();

    let base = execute_card(card.clone(), &options(&dir)).unwrap();
    let longer = execute_card(
        card,
        &RunOptions {
            t_end: Some(0.25),
            ..options(&dir)
        },
    )
    .unwrap();

    assert_ne!(base.run_id, longer.run_id);
    assert_eq!(longer.manifest.steps, 16);
    assert_eq!(longer.manifest.t_end_s, 0.25);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bad_end_time_is_rejected() {
    let dir = temp_dir("bad_t_end");
    let card = parse_yaml(CARD).unwrap();
    let err = execute_card(
        card,
        &RunOptions {
            t_end: Some(-1.0),
            ..options(&dir)
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn card_file_is_loaded_by_path() {
    let dir = temp_dir("by_path");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("case.yaml");
    std::fs::write(&path, CARD).unwrap();

    let response = ensure_run(&RunRequest {
        card_path: &path,
        options: options(&dir.join("runs")),
    })
    .unwrap();
    assert_eq!(response.manifest.steps, 8);

    let missing = dir.join("missing.yaml");
    let err = ensure_run(&RunRequest {
        card_path: &missing,
        options: options(&dir),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::Card { .. }));

    let _ = std::fs::remove_dir_all(&dir);
}
