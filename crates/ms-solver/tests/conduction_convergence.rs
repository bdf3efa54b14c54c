//! Long-run behaviour of the implicit conduction solvers.

use ms_solver::{BoundarySpec, ConductionField1d, ConductionField2d, Geometry, solve_1d, solve_2d};

const T0: f64 = 300.0;
const EDGE: BoundarySpec = BoundarySpec::Dirichlet { value: T0 };

#[test]
fn five_cell_salt_slab_relaxes_to_boundary_temperature() {
    let mut field = ConductionField1d::uniform(5, 900.0, 10.0, 1800.0, 1500.0).unwrap();

    for _ in 0..3000 {
        solve_1d(&mut field, 0.01, 1.0, Geometry::Planar, &[EDGE, EDGE]).unwrap();
    }

    for (i, t) in field.temperature().iter().enumerate() {
        assert!((t - T0).abs() < 1e-3, "node {i} = {t}, expected {T0}");
    }
}

#[test]
fn any_initial_profile_relaxes_to_equal_dirichlet_value() {
    let profiles: [Vec<f64>; 3] = [
        vec![1200.0, 100.0, 800.0, 50.0, 640.0, 300.0, 10.0],
        (0..7).map(|i| 300.0 + 100.0 * i as f64).collect(),
        vec![-50.0; 7],
    ];

    for initial in profiles {
        let n = initial.len();
        let mut field = ConductionField1d::new(
            initial,
            vec![5.0; n],
            vec![1000.0; n],
            vec![1000.0; n],
            vec![0.0; n],
        )
        .unwrap();

        for _ in 0..2000 {
            solve_1d(&mut field, 0.02, 5.0, Geometry::Planar, &[EDGE, EDGE]).unwrap();
        }

        for t in field.temperature() {
            assert!((t - T0).abs() < 1e-6, "got {t}");
        }
    }
}

#[test]
fn robin_wall_approaches_ambient_without_source() {
    let mut field = ConductionField1d::uniform(8, 900.0, 10.0, 1800.0, 1500.0).unwrap();
    let bc = [
        BoundarySpec::Symmetry,
        BoundarySpec::Robin {
            h: 30.0,
            ambient: T0,
        },
    ];

    let mut previous = field.temperature().to_vec();
    for _ in 0..200 {
        solve_1d(&mut field, 0.01, 10.0, Geometry::Cylindrical, &bc).unwrap();
        // monotone cooling toward ambient
        for (now, before) in field.temperature().iter().zip(&previous) {
            assert!(*now <= before + 1e-9);
            assert!(*now >= T0 - 1e-9);
        }
        previous = field.temperature().to_vec();
    }
}

#[test]
fn cylinder_with_symmetric_core_relaxes_to_wall_temperature() {
    let mut field = ConductionField2d::uniform(6, 5, 900.0, 10.0, 1800.0, 1500.0).unwrap();

    for _ in 0..4000 {
        solve_2d(
            &mut field,
            0.01,
            0.01,
            1.0,
            &[BoundarySpec::Symmetry, EDGE],
            &[EDGE, EDGE],
        )
        .unwrap();
    }

    for t in field.temperature().iter() {
        assert!((t - T0).abs() < 1e-3, "got {t}");
    }
}
