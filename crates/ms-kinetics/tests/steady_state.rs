//! Long-run behaviour of the point-kinetics engine with the six-group set.

use ms_kinetics::{KineticsParams, PointKinetics};

fn six_group(transit_time: f64) -> KineticsParams {
    KineticsParams {
        beta_i: vec![2.15e-4, 1.424e-3, 1.274e-3, 2.568e-3, 7.48e-4, 2.73e-4],
        lambda_i: vec![0.0124, 0.0305, 0.111, 0.301, 1.14, 3.01],
        generation_time: 1e-4,
        transit_time,
        tau: 0.5,
    }
}

#[test]
fn zero_reactivity_holds_unit_power() {
    // A very long core transit time makes the returning precursor term negligible
    let mut pk = PointKinetics::new(six_group(1e9), 1e-3).unwrap();
    for _ in 0..5000 {
        let (n, _) = pk.step(0.0);
        assert!((n - 1.0).abs() < 1e-6, "n drifted to {n}");
    }
}

#[test]
fn returning_precursors_raise_power() {
    let mut pk = PointKinetics::new(six_group(2.0), 1e-3).unwrap();
    for _ in 0..2000 {
        pk.step(0.0);
    }
    assert!(pk.n() > 1.0);
    assert!(pk.n().is_finite());
}

#[test]
fn reruns_are_bit_identical() {
    let run = || {
        let mut pk = PointKinetics::new(six_group(2.0), 1e-3).unwrap();
        (0..1500)
            .map(|i| pk.step(if i < 500 { 1e-4 } else { -1e-3 }).0)
            .collect::<Vec<f64>>()
    };
    assert_eq!(run(), run());
}
