//! Multi-step behaviour of the explicit loop update.

use ms_hydraulics::{FlowBoundary, HydraulicState, HydraulicsParams, apply_flow_boundaries, update_hydraulics};

#[test]
fn hot_slug_is_advected_downstream() {
    let n = 20;
    let mut enthalpy = vec![2.0e5; n];
    enthalpy[3] = 2.5e5;
    let mut state = HydraulicState::new(vec![1800.0; n], vec![1.0; n], vec![1e5; n], enthalpy)
        .unwrap();
    let params = HydraulicsParams {
        area: 1.0,
        valve_area: 1.0,
        ..HydraulicsParams::default()
    };
    let inlet = FlowBoundary::Fixed {
        density: 1800.0,
        velocity: 1.0,
        pressure: 1e5,
        enthalpy: 2.0e5,
    };

    for _ in 0..50 {
        update_hydraulics(&mut state, 0.1, 0.02, &params).unwrap();
        apply_flow_boundaries(&mut state, &inlet, &FlowBoundary::ZeroGradient);
    }

    // the peak moved from cell 3 by about u·t/dx = 10 cells
    let peak = state
        .enthalpy()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert!((10..=16).contains(&peak), "peak at cell {peak}");
    for h in state.enthalpy() {
        assert!(*h >= 2.0e5 - 1e-6 && *h <= 2.5e5 + 1e-6);
    }
}

#[test]
fn fluid_at_rest_with_uniform_pressure_stays_at_rest() {
    let mut state = HydraulicState::uniform(10, 1800.0, 0.0, 1e5, 2e5).unwrap();
    let params = HydraulicsParams::default();
    for _ in 0..100 {
        let step = update_hydraulics(&mut state, 0.05, 0.01, &params).unwrap();
        assert_eq!(step.eos_density, state.density().to_vec());
    }
    assert!(state.velocity().iter().all(|u| *u == 0.0));
    assert!(state.density().iter().all(|rho| *rho == 1800.0));
}
