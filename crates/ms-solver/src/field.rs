//! Temperature fields with co-indexed material properties.
//!
//! Each field keeps its temperature, conductivity, density, specific heat and
//! volumetric source in one shape. Constructors reject mismatched shapes and the
//! mutators only hand out fixed-size views, so the shapes stay equal for the
//! lifetime of the field.

use crate::error::{SolverError, SolverResult};
use ms_core::ensure_len;
use nalgebra::DMatrix;

/// 1D line of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductionField1d {
    temperature: Vec<f64>,
    conductivity: Vec<f64>,
    density: Vec<f64>,
    specific_heat: Vec<f64>,
    source: Vec<f64>,
}

impl ConductionField1d {
    pub fn new(
        temperature: Vec<f64>,
        conductivity: Vec<f64>,
        density: Vec<f64>,
        specific_heat: Vec<f64>,
        source: Vec<f64>,
    ) -> SolverResult<Self> {
        let n = temperature.len();
        if n < 2 {
            return Err(SolverError::InvalidArg {
                what: "conduction line needs at least two nodes",
            });
        }
        ensure_len(conductivity.len(), n, "conductivity")?;
        ensure_len(density.len(), n, "density")?;
        ensure_len(specific_heat.len(), n, "specific_heat")?;
        ensure_len(source.len(), n, "source")?;
        Ok(Self {
            temperature,
            conductivity,
            density,
            specific_heat,
            source,
        })
    }

    /// Uniform material, uniform initial temperature, zero source.
    pub fn uniform(
        n: usize,
        temperature: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> SolverResult<Self> {
        Self::new(
            vec![temperature; n],
            vec![conductivity; n],
            vec![density; n],
            vec![specific_heat; n],
            vec![0.0; n],
        )
    }

    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn conductivity(&self) -> &[f64] {
        &self.conductivity
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn specific_heat(&self) -> &[f64] {
        &self.specific_heat
    }

    pub fn source(&self) -> &[f64] {
        &self.source
    }

    pub fn temperature_mut(&mut self) -> &mut [f64] {
        &mut self.temperature
    }

    pub fn source_mut(&mut self) -> &mut [f64] {
        &mut self.source
    }

    pub fn set_source_uniform(&mut self, q: f64) {
        self.source.fill(q);
    }

    /// Replace the node densities, e.g. with the loop's salt density.
    pub fn set_density(&mut self, density: &[f64]) -> SolverResult<()> {
        ensure_len(density.len(), self.temperature.len(), "density")?;
        self.density.copy_from_slice(density);
        Ok(())
    }

    /// Last node, i.e. the outlet end of the line.
    pub fn last_temperature(&self) -> f64 {
        self.temperature[self.temperature.len() - 1]
    }
}

/// 2D grid, rows are axial positions and columns radial positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductionField2d {
    pub(crate) temperature: DMatrix<f64>,
    conductivity: DMatrix<f64>,
    density: DMatrix<f64>,
    specific_heat: DMatrix<f64>,
    source: DMatrix<f64>,
}

fn ensure_shape(
    m: &DMatrix<f64>,
    shape: (usize, usize),
    what: &'static str,
) -> SolverResult<()> {
    ensure_len(m.nrows(), shape.0, what)?;
    ensure_len(m.ncols(), shape.1, what)?;
    Ok(())
}

impl ConductionField2d {
    pub fn new(
        temperature: DMatrix<f64>,
        conductivity: DMatrix<f64>,
        density: DMatrix<f64>,
        specific_heat: DMatrix<f64>,
        source: DMatrix<f64>,
    ) -> SolverResult<Self> {
        let shape = temperature.shape();
        if shape.0 < 2 || shape.1 < 2 {
            return Err(SolverError::InvalidArg {
                what: "conduction grid needs at least two nodes per axis",
            });
        }
        ensure_shape(&conductivity, shape, "conductivity")?;
        ensure_shape(&density, shape, "density")?;
        ensure_shape(&specific_heat, shape, "specific_heat")?;
        ensure_shape(&source, shape, "source")?;
        Ok(Self {
            temperature,
            conductivity,
            density,
            specific_heat,
            source,
        })
    }

    pub fn uniform(
        axial: usize,
        radial: usize,
        temperature: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> SolverResult<Self> {
        Self::new(
            DMatrix::from_element(axial, radial, temperature),
            DMatrix::from_element(axial, radial, conductivity),
            DMatrix::from_element(axial, radial, density),
            DMatrix::from_element(axial, radial, specific_heat),
            DMatrix::zeros(axial, radial),
        )
    }

    /// (axial rows, radial columns)
    pub fn shape(&self) -> (usize, usize) {
        self.temperature.shape()
    }

    pub fn temperature(&self) -> &DMatrix<f64> {
        &self.temperature
    }

    pub fn conductivity(&self) -> &DMatrix<f64> {
        &self.conductivity
    }

    pub fn density(&self) -> &DMatrix<f64> {
        &self.density
    }

    pub fn specific_heat(&self) -> &DMatrix<f64> {
        &self.specific_heat
    }

    pub fn source(&self) -> &DMatrix<f64> {
        &self.source
    }

    pub fn set_source(&mut self, source: DMatrix<f64>) -> SolverResult<()> {
        ensure_shape(&source, self.shape(), "source")?;
        self.source = source;
        Ok(())
    }

    pub fn set_source_uniform(&mut self, q: f64) {
        self.source.fill(q);
    }

    /// Give every node of axial row `i` the density `density[i]`.
    pub fn set_axial_density(&mut self, density: &[f64]) -> SolverResult<()> {
        ensure_len(density.len(), self.density.nrows(), "axial density")?;
        for (mut row, &rho) in self.density.row_iter_mut().zip(density) {
            row.fill(rho);
        }
        Ok(())
    }

    /// Mean temperature of the last axial row.
    pub fn outlet_mean_temperature(&self) -> f64 {
        let last = self.temperature.nrows() - 1;
        self.temperature.row(last).mean()
    }
}
