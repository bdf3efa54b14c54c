//! Incremental (velocity-form) PID.
//!
//! Each update computes an output increment from the last three errors:
//!
//! ```text
//! Δu = Kp·(e − e₁) + Kp·dt/Ti·e + Kp·Td/dt·(e − 2·e₁ + e₂)
//! ```
//!
//! and adds it to the stored output. Clamping the accumulated output to the
//! limits is the only anti-windup measure.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// PID tuning as written in the input card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    #[serde(rename = "Kp")]
    pub kp: f64,
    /// Integral time (seconds).
    #[serde(rename = "Ti")]
    pub ti: f64,
    /// Derivative time (seconds).
    #[serde(rename = "Td")]
    pub td: f64,
    /// Output limits `(min, max)`.
    #[serde(default)]
    pub limits: Option<(f64, f64)>,
    /// Output before the first update.
    #[serde(default)]
    pub initial_output: f64,
}

/// Incremental PID state and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalPid {
    pub kp: f64,
    pub ti: f64,
    pub td: f64,
    pub dt: f64,
    pub limits: Option<(f64, f64)>,
    e_prev: f64,
    e_prev2: f64,
    u: f64,
}

impl IncrementalPid {
    /// Create a new controller with zero error history and zero output.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain
    /// * `ti` - Integral time (seconds, positive)
    /// * `td` - Derivative time (seconds, non-negative)
    /// * `dt` - Update period (seconds, positive)
    /// * `limits` - Optional `(min, max)` output clamp with `min < max`
    pub fn new(
        kp: f64,
        ti: f64,
        td: f64,
        dt: f64,
        limits: Option<(f64, f64)>,
    ) -> ControlResult<Self> {
        if ti <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "ti must be positive",
            });
        }
        if td < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "td must be non-negative",
            });
        }
        if dt <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if let Some((min, max)) = limits {
            if !(min < max) {
                return Err(ControlError::InvalidArg {
                    what: "limit min must be less than max",
                });
            }
        }
        Ok(Self {
            kp,
            ti,
            td,
            dt,
            limits,
            e_prev: 0.0,
            e_prev2: 0.0,
            u: 0.0,
        })
    }

    pub fn from_config(config: &PidConfig, dt: f64) -> ControlResult<Self> {
        Ok(Self::new(config.kp, config.ti, config.td, dt, config.limits)?
            .with_initial_output(config.initial_output))
    }

    /// Set the stored output used as the base of the first increment.
    pub fn with_initial_output(mut self, u: f64) -> Self {
        self.u = u;
        self
    }

    /// Feed the error `e = measured − setpoint` and return the new output.
    pub fn update(&mut self, e: f64) -> f64 {
        let delta = self.kp * (e - self.e_prev)
            + self.kp * self.dt / self.ti * e
            + self.kp * self.td / self.dt * (e - 2.0 * self.e_prev + self.e_prev2);
        self.u += delta;

        if let Some((min, max)) = self.limits {
            self.u = self.u.clamp(min, max);
        }

        self.e_prev2 = self.e_prev;
        self.e_prev = e;
        self.u
    }

    /// Output after the most recent update.
    pub fn output(&self) -> f64 {
        self.u
    }

    /// `(e_prev, e_prev2)`
    pub fn error_history(&self) -> (f64, f64) {
        (self.e_prev, self.e_prev2)
    }
}
