//! Supervisory state machine.
//!
//! Per step, in order:
//! 1. update the trip with the outlet temperature
//! 2. reactivity: SCRAM value while tripped, reactivity PID otherwise
//! 3. heat removal: heat-removal PID in `Pid` mode, predictive controller in `Mpc`
//!    mode; a PID output jump above the anomaly threshold latches `Mpc`
//! 4. a failed heat-removal computation is replaced by the fallback command
//! 5. append the step record to the log

use crate::error::{ControlResult, finite_command};
use crate::log::{ControlEvent, ControlLog, ControlRecord};
use crate::pid::{IncrementalPid, PidConfig};
use crate::predictive::{MpcConfig, PredictiveController};
use crate::trip::{TripConfig, TripLogic};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Heat-removal controller in charge.
///
/// The only transition is `Pid → Mpc`, and it is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Pid,
    Mpc,
}

/// Which law produced this step's heat-removal command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandSource {
    Pid,
    Mpc,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    pub outlet_temperature: f64,
    pub reference_temperature: f64,
    pub power: f64,
    pub reference_power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommands {
    pub reactivity: f64,
    /// Heat-removal capability `U`.
    pub heat_removal: f64,
    pub scram: bool,
    pub mode: ControlMode,
    pub source: CommandSource,
}

/// Controller settings as written in the `control` section of the input card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Heat-removal PID.
    pub pid_temp: PidConfig,
    /// Reactivity PID.
    pub pid_rho: PidConfig,
    pub mpc: MpcConfig,
    pub trip: TripConfig,
    pub anomaly_threshold: f64,
    pub fallback_command: f64,
    pub scram_reactivity: f64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            pid_temp: PidConfig {
                kp: 2000.0,
                ti: 50.0,
                td: 300.0,
                limits: Some((1000.0, 20000.0)),
                initial_output: 0.0,
            },
            pid_rho: PidConfig {
                kp: 500.0,
                ti: 100.0,
                td: 10.0,
                limits: Some((-0.01, 0.01)),
                initial_output: 0.0,
            },
            mpc: MpcConfig::default(),
            trip: TripConfig::default(),
            anomaly_threshold: 1000.0,
            fallback_command: 15000.0,
            scram_reactivity: -0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ControlSupervisor {
    heat_pid: IncrementalPid,
    reactivity_pid: IncrementalPid,
    mpc: PredictiveController,
    trip: TripLogic,
    mode: ControlMode,
    anomaly_threshold: f64,
    fallback_command: f64,
    scram_reactivity: f64,
}

impl ControlSupervisor {
    pub fn new(config: &SupervisorConfig, dt: f64) -> ControlResult<Self> {
        Ok(Self {
            heat_pid: IncrementalPid::from_config(&config.pid_temp, dt)?,
            reactivity_pid: IncrementalPid::from_config(&config.pid_rho, dt)?,
            mpc: PredictiveController::new(&config.mpc, dt)?,
            trip: TripLogic::from_config(&config.trip),
            mode: ControlMode::Pid,
            anomaly_threshold: config.anomaly_threshold,
            fallback_command: config.fallback_command,
            scram_reactivity: config.scram_reactivity,
        })
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn is_tripped(&self) -> bool {
        self.trip.is_active()
    }

    pub fn heat_pid(&self) -> &IncrementalPid {
        &self.heat_pid
    }

    pub fn reactivity_pid(&self) -> &IncrementalPid {
        &self.reactivity_pid
    }

    /// Decide this step's actuator commands.
    pub fn update(&mut self, sensors: &Sensors, step: u64, log: &mut ControlLog) -> ControlCommands {
        let was_tripped = self.trip.is_active();
        let scram = self.trip.update(sensors.outlet_temperature);
        let power_error = sensors.power - sensors.reference_power;
        let temperature_error = sensors.outlet_temperature - sensors.reference_temperature;

        let reactivity = if scram {
            self.scram_reactivity
        } else {
            self.reactivity_pid.update(power_error)
        };
        if scram && !was_tripped {
            warn!(
                step,
                outlet_temperature = sensors.outlet_temperature,
                threshold = self.trip.threshold,
                "SCRAM triggered"
            );
            log.push(ControlEvent::Trip {
                step,
                outlet_temperature: sensors.outlet_temperature,
                reactivity,
            });
        }

        let (heat_removal, source) = match self.heat_removal(sensors, temperature_error, step, log) {
            Ok(command) => command,
            Err(err) => {
                error!(step, %err, fallback = self.fallback_command, "heat removal command failed");
                log.push(ControlEvent::Fallback {
                    step,
                    reason: err.to_string(),
                    command: self.fallback_command,
                });
                (self.fallback_command, CommandSource::Fallback)
            }
        };

        debug!(step, mode = ?self.mode, ?source, reactivity, heat_removal, scram, "control step");
        log.push(ControlEvent::Step(ControlRecord {
            step,
            mode: self.mode,
            source,
            outlet_temperature: sensors.outlet_temperature,
            reference_temperature: sensors.reference_temperature,
            power: sensors.power,
            reference_power: sensors.reference_power,
            temperature_error,
            power_error,
            reactivity,
            heat_removal,
            scram,
        }));

        ControlCommands {
            reactivity,
            heat_removal,
            scram,
            mode: self.mode,
            source,
        }
    }

    fn heat_removal(
        &mut self,
        sensors: &Sensors,
        temperature_error: f64,
        step: u64,
        log: &mut ControlLog,
    ) -> ControlResult<(f64, CommandSource)> {
        match self.mode {
            ControlMode::Pid => {
                let previous = self.heat_pid.output();
                // A rejected command must leave the PID state as it was.
                let mut candidate = self.heat_pid.clone();
                let u = finite_command(candidate.update(temperature_error), "heat removal")?;
                self.heat_pid = candidate;
                let jump = (u - previous).abs();
                if jump > self.anomaly_threshold {
                    warn!(step, jump, "heat removal PID anomaly, switching to predictive control");
                    log.push(ControlEvent::ModeSwitch {
                        step,
                        from: ControlMode::Pid,
                        to: ControlMode::Mpc,
                        jump,
                    });
                    self.mode = ControlMode::Mpc;
                }
                Ok((u, CommandSource::Pid))
            }
            ControlMode::Mpc => {
                let u = self
                    .mpc
                    .update(sensors.outlet_temperature, Some(sensors.reference_temperature));
                Ok((finite_command(u, "heat removal")?, CommandSource::Mpc))
            }
        }
    }
}
