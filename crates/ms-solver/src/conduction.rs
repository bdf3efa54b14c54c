//! Backward-Euler finite-difference conduction.
//!
//! Interior rows balance west/east conductances (harmonic-mean interface
//! conductivity times face area factor over spacing) against the transient
//! storage term `ρ·cp·Δx/Δt`. Boundary rows come from [`BoundarySpec::row`].
//!
//! The 2D solver uses first-order (Lie) operator splitting: one radial sweep per
//! axial row on the current field, then one axial sweep per radial column on the
//! intermediate field. The volumetric source enters both sweeps. This ordering is
//! not symmetrized and results depend on it.

use crate::boundary::{BoundarySpec, Geometry};
use crate::error::{SolverError, SolverResult};
use crate::field::{ConductionField1d, ConductionField2d};
use crate::tridiag::TridiagonalSystem;
use ms_core::harmonic_mean;
use nalgebra::DMatrix;

/// One line of co-indexed nodal data.
struct Line<'a> {
    k: &'a [f64],
    rho: &'a [f64],
    cp: &'a [f64],
    t: &'a [f64],
    q: &'a [f64],
}

fn assemble_line(
    line: &Line<'_>,
    spacing: f64,
    dt: f64,
    geometry: Geometry,
    bc: &[BoundarySpec; 2],
) -> TridiagonalSystem {
    let n = line.t.len();
    let mut sys = TridiagonalSystem::zeros(n);

    for i in 1..n - 1 {
        let x = i as f64;
        let area_w = geometry.area_factor((x - 0.5) * spacing);
        let area_e = geometry.area_factor((x + 0.5) * spacing);

        let kw = harmonic_mean(line.k[i], line.k[i - 1]);
        let ke = harmonic_mean(line.k[i], line.k[i + 1]);

        let aw = kw * area_w / spacing;
        let ae = ke * area_e / spacing;
        let storage = line.rho[i] * line.cp[i] * spacing / dt;

        sys.sub[i - 1] = -aw;
        sys.diag[i] = aw + ae + storage;
        sys.sup[i] = -ae;
        sys.rhs[i] = storage * line.t[i] + line.q[i] * spacing;
    }

    let left = bc[0].row(line.k[0], spacing);
    sys.diag[0] = left.diag;
    sys.sup[0] = left.neighbor;
    sys.rhs[0] = left.rhs;

    let right = bc[1].row(line.k[n - 1], spacing);
    sys.diag[n - 1] = right.diag;
    sys.sub[n - 2] = right.neighbor;
    sys.rhs[n - 1] = right.rhs;

    sys
}

fn check_steps(spacing: f64, dt: f64) -> SolverResult<()> {
    if spacing <= 0.0 {
        return Err(SolverError::InvalidArg {
            what: "grid spacing must be positive",
        });
    }
    if dt <= 0.0 {
        return Err(SolverError::InvalidArg {
            what: "time step must be positive",
        });
    }
    Ok(())
}

/// Advance a 1D field by one implicit step of size `dt`.
///
/// `bc` is `[left, right]`.
pub fn solve_1d(
    field: &mut ConductionField1d,
    dx: f64,
    dt: f64,
    geometry: Geometry,
    bc: &[BoundarySpec; 2],
) -> SolverResult<()> {
    check_steps(dx, dt)?;
    let sys = assemble_line(
        &Line {
            k: field.conductivity(),
            rho: field.density(),
            cp: field.specific_heat(),
            t: field.temperature(),
            q: field.source(),
        },
        dx,
        dt,
        geometry,
        bc,
    );
    let next = sys.solve()?;
    field.temperature_mut().copy_from_slice(&next);
    Ok(())
}

fn row_of(m: &DMatrix<f64>, i: usize) -> Vec<f64> {
    m.row(i).iter().copied().collect()
}

fn column_of(m: &DMatrix<f64>, j: usize) -> Vec<f64> {
    m.column(j).iter().copied().collect()
}

/// Advance a cylindrical 2D field by one split implicit step.
///
/// `radial` is `[inner, outer]`, `axial` is `[bottom, top]`.
pub fn solve_2d(
    field: &mut ConductionField2d,
    dr: f64,
    dz: f64,
    dt: f64,
    radial: &[BoundarySpec; 2],
    axial: &[BoundarySpec; 2],
) -> SolverResult<()> {
    check_steps(dr, dt)?;
    check_steps(dz, dt)?;
    let (nz, nr) = field.shape();

    // Radial sweep on the current field
    let mut intermediate = field.temperature().clone();
    for i in 0..nz {
        let (k, rho, cp) = (
            row_of(field.conductivity(), i),
            row_of(field.density(), i),
            row_of(field.specific_heat(), i),
        );
        let (t, q) = (row_of(field.temperature(), i), row_of(field.source(), i));
        let sys = assemble_line(
            &Line {
                k: &k,
                rho: &rho,
                cp: &cp,
                t: &t,
                q: &q,
            },
            dr,
            dt,
            Geometry::Cylindrical,
            radial,
        );
        for (j, value) in sys.solve()?.into_iter().enumerate() {
            intermediate[(i, j)] = value;
        }
    }

    // Axial sweep on the intermediate field
    let mut next = intermediate.clone();
    for j in 0..nr {
        let (k, rho, cp) = (
            column_of(field.conductivity(), j),
            column_of(field.density(), j),
            column_of(field.specific_heat(), j),
        );
        let (t, q) = (column_of(&intermediate, j), column_of(field.source(), j));
        let sys = assemble_line(
            &Line {
                k: &k,
                rho: &rho,
                cp: &cp,
                t: &t,
                q: &q,
            },
            dz,
            dt,
            Geometry::Planar,
            axial,
        );
        for (i, value) in sys.solve()?.into_iter().enumerate() {
            next[(i, j)] = value;
        }
    }

    field.temperature = next;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRICHLET_300: BoundarySpec = BoundarySpec::Dirichlet { value: 300.0 };

    #[test]
    fn interior_row_coefficients() {
        let k = [10.0, 30.0, 10.0];
        let rho = [2.0; 3];
        let cp = [5.0; 3];
        let t = [0.0, 100.0, 0.0];
        let q = [0.0, 4.0, 0.0];
        let sys = assemble_line(
            &Line {
                k: &k,
                rho: &rho,
                cp: &cp,
                t: &t,
                q: &q,
            },
            0.5,
            1.0,
            Geometry::Planar,
            &[DIRICHLET_300, DIRICHLET_300],
        );
        // harmonic mean of 10 and 30 is 15; conductance 15/0.5 = 30
        assert_eq!(sys.sub[0], -30.0);
        assert_eq!(sys.sup[1], -30.0);
        // storage 2*5*0.5/1 = 5
        assert_eq!(sys.diag[1], 65.0);
        assert_eq!(sys.rhs[1], 5.0 * 100.0 + 4.0 * 0.5);
        // Dirichlet rows are identity rows
        assert_eq!((sys.diag[0], sys.sup[0], sys.rhs[0]), (1.0, 0.0, 300.0));
        assert_eq!((sys.diag[2], sys.sub[1], sys.rhs[2]), (1.0, 0.0, 300.0));
    }

    #[test]
    fn cylindrical_faces_scale_conductance() {
        let k = [1.0; 4];
        let ones = [1.0; 4];
        let zeros = [0.0; 4];
        let sys = assemble_line(
            &Line {
                k: &k,
                rho: &ones,
                cp: &ones,
                t: &zeros,
                q: &zeros,
            },
            1.0,
            1.0,
            Geometry::Cylindrical,
            &[BoundarySpec::Symmetry, DIRICHLET_300],
        );
        // node 2: west face at r=1.5, east face at r=2.5
        assert_eq!(sys.sub[1], -1.5);
        assert_eq!(sys.sup[2], -2.5);
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        let mut field = ConductionField1d::uniform(5, 900.0, 10.0, 1800.0, 1500.0).unwrap();
        let bc = [DIRICHLET_300, DIRICHLET_300];
        assert!(solve_1d(&mut field, 0.0, 1.0, Geometry::Planar, &bc).is_err());
        assert!(solve_1d(&mut field, 0.01, -1.0, Geometry::Planar, &bc).is_err());
    }

    #[test]
    fn dirichlet_rows_pin_edges_after_one_step() {
        let mut field = ConductionField1d::uniform(5, 900.0, 10.0, 1800.0, 1500.0).unwrap();
        solve_1d(
            &mut field,
            0.01,
            1.0,
            Geometry::Planar,
            &[DIRICHLET_300, DIRICHLET_300],
        )
        .unwrap();
        let t = field.temperature();
        assert!((t[0] - 300.0).abs() < 1e-9);
        assert!((t[4] - 300.0).abs() < 1e-9);
        // interior cools but stays between the bounds
        assert!(t[2] < 900.0 && t[2] > 300.0);
    }

    #[test]
    fn insulated_line_keeps_uniform_state() {
        let mut field = ConductionField1d::uniform(6, 500.0, 2.0, 1.0, 1.0).unwrap();
        solve_1d(
            &mut field,
            0.1,
            0.5,
            Geometry::Planar,
            &[BoundarySpec::Symmetry, BoundarySpec::Symmetry],
        )
        .unwrap();
        for t in field.temperature() {
            assert!((t - 500.0).abs() < 1e-9);
        }
    }

    #[test]
    fn two_d_uniform_dirichlet_field_is_fixed_point() {
        let mut field = ConductionField2d::uniform(4, 5, 300.0, 10.0, 1800.0, 1500.0).unwrap();
        solve_2d(
            &mut field,
            0.01,
            0.02,
            1.0,
            &[BoundarySpec::Symmetry, DIRICHLET_300],
            &[DIRICHLET_300, DIRICHLET_300],
        )
        .unwrap();
        for t in field.temperature().iter() {
            assert!((t - 300.0).abs() < 1e-9);
        }
    }
}
