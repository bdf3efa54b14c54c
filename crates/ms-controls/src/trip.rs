//! Threshold trip with optional latch.

use serde::{Deserialize, Serialize};

/// Direction in which crossing the threshold trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripMode {
    /// Trip when the value exceeds the threshold.
    #[default]
    Greater,
    /// Trip when the value drops below the threshold.
    Less,
}

/// Trip settings as written in the input card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    pub threshold: f64,
    pub mode: TripMode,
    pub hold_state: bool,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            threshold: 1200.0,
            mode: TripMode::Greater,
            hold_state: true,
        }
    }
}

/// Boolean trip state.
///
/// With `hold_state` set, an activated trip never clears. Without it the trip
/// follows the comparison every update. Comparisons are strict, so a value equal
/// to the threshold does not trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripLogic {
    pub threshold: f64,
    pub mode: TripMode,
    pub hold_state: bool,
    active: bool,
}

impl TripLogic {
    pub fn new(threshold: f64, mode: TripMode, hold_state: bool) -> Self {
        Self {
            threshold,
            mode,
            hold_state,
            active: false,
        }
    }

    pub fn from_config(config: &TripConfig) -> Self {
        Self::new(config.threshold, config.mode, config.hold_state)
    }

    /// Feed the monitored value and return the trip state.
    pub fn update(&mut self, value: f64) -> bool {
        let crossed = match self.mode {
            TripMode::Greater => value > self.threshold,
            TripMode::Less => value < self.threshold,
        };
        if crossed {
            self.active = true;
        } else if !self.hold_state {
            self.active = false;
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
