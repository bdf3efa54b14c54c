//! Control event stream.
//!
//! The supervisor appends to a [`ControlLog`] owned by the caller, which drains
//! it between steps and forwards the events wherever they are persisted.

use crate::supervisor::{CommandSource, ControlMode};
use serde::{Deserialize, Serialize};

/// Everything the supervisor saw and decided in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub step: u64,
    pub mode: ControlMode,
    pub source: CommandSource,
    pub outlet_temperature: f64,
    pub reference_temperature: f64,
    pub power: f64,
    pub reference_power: f64,
    /// `outlet − reference`
    pub temperature_error: f64,
    /// `power − reference_power`
    pub power_error: f64,
    pub reactivity: f64,
    pub heat_removal: f64,
    pub scram: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControlEvent {
    Step(ControlRecord),
    /// The trip became active.
    Trip {
        step: u64,
        outlet_temperature: f64,
        reactivity: f64,
    },
    /// One-way switch of the heat-removal controller.
    ModeSwitch {
        step: u64,
        from: ControlMode,
        to: ControlMode,
        /// Output jump that triggered the switch.
        jump: f64,
    },
    /// The heat-removal computation failed and the fallback command was used.
    Fallback {
        step: u64,
        reason: String,
        command: f64,
    },
}

impl ControlEvent {
    pub fn step(&self) -> u64 {
        match self {
            ControlEvent::Step(record) => record.step,
            ControlEvent::Trip { step, .. }
            | ControlEvent::ModeSwitch { step, .. }
            | ControlEvent::Fallback { step, .. } => *step,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlLog {
    events: Vec<ControlEvent>,
}

impl ControlLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    /// Per-step records only.
    pub fn records(&self) -> impl Iterator<Item = &ControlRecord> {
        self.events.iter().filter_map(|event| match event {
            ControlEvent::Step(record) => Some(record),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
