//! Predictive heat-removal controller.
//!
//! Currently a one-step-ahead proportional law standing in for a full receding
//! horizon optimiser: `U = max(0, nominal − gain·(T − T_ref))`. The horizon is
//! carried in the configuration but not used yet.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpcConfig {
    /// Prediction horizon in steps.
    pub horizon: usize,
    /// Command at zero temperature error.
    pub nominal: f64,
    /// Command reduction per kelvin of error.
    pub gain: f64,
}

impl Default for MpcConfig {
    fn default() -> Self {
        Self {
            horizon: 10,
            nominal: 15000.0,
            gain: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictiveController {
    pub horizon: usize,
    pub dt: f64,
    pub nominal: f64,
    pub gain: f64,
    reference: f64,
}

impl PredictiveController {
    pub fn new(config: &MpcConfig, dt: f64) -> ControlResult<Self> {
        if config.horizon == 0 {
            return Err(ControlError::InvalidArg {
                what: "mpc horizon must be at least one step",
            });
        }
        if dt <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "dt must be positive",
            });
        }
        Ok(Self {
            horizon: config.horizon,
            dt,
            nominal: config.nominal,
            gain: config.gain,
            reference: 0.0,
        })
    }

    /// Compute the command for the measured temperature.
    ///
    /// A `Some` reference replaces the stored one. NaN input yields NaN.
    pub fn update(&mut self, measured: f64, reference: Option<f64>) -> f64 {
        if let Some(r) = reference {
            self.reference = r;
        }
        let u = self.nominal - self.gain * (measured - self.reference);
        if u < 0.0 { 0.0 } else { u }
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }
}
