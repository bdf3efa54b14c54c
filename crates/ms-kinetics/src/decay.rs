//! Post-shutdown decay heat.

use crate::error::{KineticsError, KineticsResult};
use ms_core::units::{Power, Time};
use serde::{Deserialize, Serialize};
use uom::si::time::second;

/// Three-exponential fit
/// `P(t) = P0·(A0 + A1·e^{−t/t1} + A2·e^{−t/t2} + A3·e^{−t/t3})`
/// with `t` the time since shutdown and `P0` the power before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct DecayHeatModel {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    #[serde(rename = "t1")]
    pub t1: f64,
    #[serde(rename = "t2")]
    pub t2: f64,
    #[serde(rename = "t3")]
    pub t3: f64,
}

impl DecayHeatModel {
    pub fn validate(&self) -> KineticsResult<()> {
        if self.t1 <= 0.0 || self.t2 <= 0.0 || self.t3 <= 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "decay heat time constants must be positive",
            });
        }
        Ok(())
    }

    /// Decay heat as a fraction of the pre-shutdown power, `t` in seconds.
    pub fn fraction(&self, t: f64) -> f64 {
        self.a0
            + self.a1 * (-t / self.t1).exp()
            + self.a2 * (-t / self.t2).exp()
            + self.a3 * (-t / self.t3).exp()
    }

    pub fn power(&self, p0: Power, since_shutdown: Time) -> Power {
        p0 * self.fraction(since_shutdown.get::<second>())
    }
}
