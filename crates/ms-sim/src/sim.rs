//! Fixed-step coupling sequence.
//!
//! One step, in order:
//! 1. controller decision from the current outlet temperature and power
//! 2. point-kinetics step under the commanded reactivity
//! 3. uniform volumetric source `q = n·Fp` into the structure
//! 4. implicit conduction step, with the salt density from the last
//!    hydraulics level
//! 5. explicit hydraulics sub-step, then the flow boundaries
//!
//! The heat-removal command is reported but not fed back into any module.

use crate::error::{SimError, SimResult};
use crate::structure::CoreStructure;
use ms_controls::{
    CommandSource, ControlEvent, ControlLog, ControlMode, ControlSupervisor, Sensors,
};
use ms_core::ensure_finite;
use ms_core::units::{s, w};
use ms_hydraulics::{
    FlowBoundary, HydraulicState, HydraulicsParams, apply_flow_boundaries, update_hydraulics,
};
use ms_kinetics::{DecayHeatModel, PointKinetics};
use ms_project::{InputCard, StructureKind};
use tracing::{debug, info, warn};

/// Values produced by one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub step: u64,
    /// Time at the start of the step (s).
    pub time: f64,
    pub n: f64,
    /// Outlet temperature after the conduction step (K).
    pub outlet_temperature: f64,
    pub reactivity: f64,
    pub heat_removal: f64,
    pub scram: bool,
    pub mode: ControlMode,
    pub source: CommandSource,
    /// Decay heat relative to the pre-trip power; `Some` only when a model is
    /// configured, zero before a trip.
    pub decay_heat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub final_time: f64,
    pub final_n: f64,
    pub final_outlet_temperature: f64,
    pub mode: ControlMode,
    /// Time of the step in which the trip activated.
    pub trip_time: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct TripRecord {
    time: f64,
    power: f64,
}

pub struct Simulation {
    dt: f64,
    step: u64,
    power_factor: f64,
    reference_temperature: f64,
    reference_power: f64,
    structure: CoreStructure,
    kinetics: PointKinetics,
    supervisor: ControlSupervisor,
    log: ControlLog,
    flow: HydraulicState,
    flow_params: HydraulicsParams,
    flow_dx: f64,
    inlet: FlowBoundary,
    outlet: FlowBoundary,
    decay_heat: Option<DecayHeatModel>,
    trip: Option<TripRecord>,
}

impl Simulation {
    /// Build every module from a validated card.
    pub fn from_card(card: &InputCard) -> SimResult<Self> {
        let dt = card.dt();
        if dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        let hyd = &card.hydraulics;

        let structure = match card.meta.structure {
            StructureKind::OneD => CoreStructure::one_d(&card.thermal_1d, hyd.n, hyd.dr)?,
            StructureKind::TwoD => CoreStructure::two_d(&card.thermal_2d)?,
        };
        let kinetics = PointKinetics::new(card.neutronics.clone(), dt)?;
        let supervisor = ControlSupervisor::new(&card.control.supervisor, dt)?;
        let flow = HydraulicState::uniform(hyd.n, hyd.rho_salt, hyd.u0, hyd.p0, hyd.h0)?;

        Ok(Self {
            dt,
            step: 0,
            power_factor: card.meta.power_factor,
            reference_temperature: card.control.t_ref,
            reference_power: card.control.n_ref,
            structure,
            kinetics,
            supervisor,
            log: ControlLog::new(),
            flow,
            flow_params: hyd.params,
            flow_dx: hyd.dr,
            inlet: hyd.inlet,
            outlet: hyd.outlet,
            decay_heat: card.decay_heat,
            trip: None,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Steps taken so far.
    pub fn steps_taken(&self) -> u64 {
        self.step
    }

    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    pub fn structure(&self) -> &CoreStructure {
        &self.structure
    }

    pub fn kinetics(&self) -> &PointKinetics {
        &self.kinetics
    }

    pub fn supervisor(&self) -> &ControlSupervisor {
        &self.supervisor
    }

    pub fn flow(&self) -> &HydraulicState {
        &self.flow
    }

    /// Temperatures of the structure, see [`CoreStructure::snapshot`].
    pub fn core_snapshot(&self) -> Vec<f64> {
        self.structure.snapshot()
    }

    /// Take the control events produced since the last drain.
    pub fn drain_control_log(&mut self) -> Vec<ControlEvent> {
        self.log.drain()
    }

    /// Advance every module by one step.
    ///
    /// Aborts with [`SimError::NonFinite`] when the neutron density or the outlet
    /// temperature stops being finite; the state is left as the failed step
    /// produced it.
    pub fn step(&mut self) -> SimResult<StepOutput> {
        let step = self.step;
        let time = self.time();

        let sensors = Sensors {
            outlet_temperature: self.structure.outlet_temperature(),
            reference_temperature: self.reference_temperature,
            power: self.kinetics.n(),
            reference_power: self.reference_power,
        };
        let commands = self.supervisor.update(&sensors, step, &mut self.log);

        if commands.scram && self.trip.is_none() {
            self.trip = Some(TripRecord {
                time,
                power: sensors.power,
            });
        }

        let (n, _) = self.kinetics.step(commands.reactivity);

        self.structure.set_source(n * self.power_factor);
        self.structure.set_density(self.flow.density())?;
        self.structure.advance(self.dt)?;

        update_hydraulics(&mut self.flow, self.flow_dx, self.dt, &self.flow_params)?;
        apply_flow_boundaries(&mut self.flow, &self.inlet, &self.outlet);

        let outlet_temperature = self.structure.outlet_temperature();
        let check = |what, value| {
            ensure_finite(value, what).map_err(|_| SimError::NonFinite { what, value, step })
        };
        check("neutron density", n)?;
        check("outlet temperature", outlet_temperature)?;

        let decay_heat = self.decay_heat.map(|model| match self.trip {
            Some(trip) => model.power(w(trip.power), s(time - trip.time)).value,
            None => 0.0,
        });

        debug!(step, time, n, outlet_temperature, rho = commands.reactivity, "step");
        self.step += 1;

        Ok(StepOutput {
            step,
            time,
            n,
            outlet_temperature,
            reactivity: commands.reactivity,
            heat_removal: commands.heat_removal,
            scram: commands.scram,
            mode: commands.mode,
            source: commands.source,
            decay_heat,
        })
    }
}

/// Run `steps` steps, calling `on_step` after each one.
///
/// The observer gets mutable access to the simulation so it can take snapshots
/// and drain the control log.
pub fn run<F>(sim: &mut Simulation, steps: u64, mut on_step: F) -> SimResult<RunSummary>
where
    F: FnMut(&StepOutput, &mut Simulation),
{
    info!(steps, dt = sim.dt(), "starting transient");

    let mut last: Option<StepOutput> = None;
    for _ in 0..steps {
        let out = match sim.step() {
            Ok(out) => out,
            Err(err) => {
                warn!(step = sim.steps_taken(), %err, "transient aborted");
                return Err(err);
            }
        };
        on_step(&out, sim);
        last = Some(out);
    }

    let summary = RunSummary {
        steps: sim.steps_taken(),
        final_time: sim.time(),
        final_n: last.as_ref().map_or(sim.kinetics().n(), |o| o.n),
        final_outlet_temperature: sim.structure().outlet_temperature(),
        mode: sim.supervisor().mode(),
        trip_time: sim.trip.map(|t| t.time),
    };
    info!(
        steps = summary.steps,
        final_time = summary.final_time,
        n = summary.final_n,
        outlet_temperature = summary.final_outlet_temperature,
        tripped = summary.trip_time.is_some(),
        "transient finished"
    );
    Ok(summary)
}
