//! Conduction model driven by the loop.

use crate::error::SimResult;
use ms_project::{Thermal1dDef, Thermal2dDef};
use ms_solver::{BoundarySpec, ConductionField1d, ConductionField2d, Geometry, solve_1d, solve_2d};

#[derive(Debug, Clone)]
pub enum CoreStructure {
    OneD {
        field: ConductionField1d,
        dx: f64,
        geometry: Geometry,
        bc: [BoundarySpec; 2],
    },
    TwoD {
        field: ConductionField2d,
        dr: f64,
        dz: f64,
        bc_r: [BoundarySpec; 2],
        bc_z: [BoundarySpec; 2],
    },
}

impl CoreStructure {
    /// 1D line of `n` nodes spaced `dx`.
    pub fn one_d(def: &Thermal1dDef, n: usize, dx: f64) -> SimResult<Self> {
        let field = ConductionField1d::uniform(n, def.init_temp, def.k, def.rho, def.cp)?;
        Ok(CoreStructure::OneD {
            field,
            dx,
            geometry: def.geometry,
            bc: def.bc,
        })
    }

    pub fn two_d(def: &Thermal2dDef) -> SimResult<Self> {
        let field =
            ConductionField2d::uniform(def.nz, def.nr, def.init_temp, def.k, def.rho, def.cp)?;
        Ok(CoreStructure::TwoD {
            field,
            dr: def.dr,
            dz: def.dz,
            bc_r: def.bc_r,
            bc_z: def.bc_z,
        })
    }

    /// Spread a uniform volumetric source (W/m³) over every node.
    pub fn set_source(&mut self, q: f64) {
        match self {
            CoreStructure::OneD { field, .. } => field.set_source_uniform(q),
            CoreStructure::TwoD { field, .. } => field.set_source_uniform(q),
        }
    }

    /// Take the salt density from the loop: node by node in 1D, one value per
    /// axial row in 2D.
    pub fn set_density(&mut self, density: &[f64]) -> SimResult<()> {
        match self {
            CoreStructure::OneD { field, .. } => field.set_density(density)?,
            CoreStructure::TwoD { field, .. } => field.set_axial_density(density)?,
        }
        Ok(())
    }

    pub fn advance(&mut self, dt: f64) -> SimResult<()> {
        match self {
            CoreStructure::OneD {
                field,
                dx,
                geometry,
                bc,
            } => solve_1d(field, *dx, dt, *geometry, bc)?,
            CoreStructure::TwoD {
                field,
                dr,
                dz,
                bc_r,
                bc_z,
            } => solve_2d(field, *dr, *dz, dt, bc_r, bc_z)?,
        }
        Ok(())
    }

    /// Last axial node (1D) or mean of the last axial row (2D).
    pub fn outlet_temperature(&self) -> f64 {
        match self {
            CoreStructure::OneD { field, .. } => field.last_temperature(),
            CoreStructure::TwoD { field, .. } => field.outlet_mean_temperature(),
        }
    }

    /// Temperatures as a flat vector; 2D grids are flattened row by row
    /// (axial-major).
    pub fn snapshot(&self) -> Vec<f64> {
        match self {
            CoreStructure::OneD { field, .. } => field.temperature().to_vec(),
            CoreStructure::TwoD { field, .. } => {
                let t = field.temperature();
                (0..t.nrows())
                    .flat_map(|i| t.row(i).iter().copied().collect::<Vec<_>>())
                    .collect()
            }
        }
    }

    /// `[len]` for 1D, `[axial, radial]` for 2D.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            CoreStructure::OneD { field, .. } => vec![field.len()],
            CoreStructure::TwoD { field, .. } => {
                let (nz, nr) = field.shape();
                vec![nz, nr]
            }
        }
    }
}
