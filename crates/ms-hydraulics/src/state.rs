//! Co-indexed flow state along the loop.

use crate::error::{HydraulicsError, HydraulicsResult};
use ms_core::ensure_len;

/// Cell-centred density, velocity, pressure and specific enthalpy.
///
/// All four sequences share one length for the lifetime of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct HydraulicState {
    density: Vec<f64>,
    velocity: Vec<f64>,
    pressure: Vec<f64>,
    enthalpy: Vec<f64>,
}

impl HydraulicState {
    pub fn new(
        density: Vec<f64>,
        velocity: Vec<f64>,
        pressure: Vec<f64>,
        enthalpy: Vec<f64>,
    ) -> HydraulicsResult<Self> {
        let n = density.len();
        if n < 3 {
            return Err(HydraulicsError::InvalidArg {
                what: "flow path needs at least three cells",
            });
        }
        ensure_len(velocity.len(), n, "velocity")?;
        ensure_len(pressure.len(), n, "pressure")?;
        ensure_len(enthalpy.len(), n, "enthalpy")?;
        Ok(Self {
            density,
            velocity,
            pressure,
            enthalpy,
        })
    }

    pub fn uniform(
        n: usize,
        density: f64,
        velocity: f64,
        pressure: f64,
        enthalpy: f64,
    ) -> HydraulicsResult<Self> {
        Self::new(
            vec![density; n],
            vec![velocity; n],
            vec![pressure; n],
            vec![enthalpy; n],
        )
    }

    pub fn len(&self) -> usize {
        self.density.len()
    }

    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    pub fn enthalpy(&self) -> &[f64] {
        &self.enthalpy
    }

    /// Mutable views of (density, velocity, pressure, enthalpy).
    pub fn fields_mut(&mut self) -> (&mut [f64], &mut [f64], &mut [f64], &mut [f64]) {
        (
            &mut self.density,
            &mut self.velocity,
            &mut self.pressure,
            &mut self.enthalpy,
        )
    }
}
