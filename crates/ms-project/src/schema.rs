//! Input card schema.

use ms_controls::SupervisorConfig;
use ms_hydraulics::{FlowBoundary, HydraulicsParams};
use ms_kinetics::{DecayHeatModel, KineticsParams};
use ms_solver::{BoundarySpec, Geometry};
use serde::{Deserialize, Serialize};

/// Top-level sections every card must contain.
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "meta",
    "neutronics",
    "thermal_1d",
    "thermal_2d",
    "hydraulics",
    "control",
    "recorder",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputCard {
    pub meta: MetaDef,
    pub neutronics: KineticsParams,
    pub thermal_1d: Thermal1dDef,
    pub thermal_2d: Thermal2dDef,
    pub hydraulics: HydraulicsDef,
    pub control: ControlDef,
    pub recorder: RecorderDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_heat: Option<DecayHeatModel>,
}

impl InputCard {
    /// Number of fixed steps, `⌊t_end/dt⌋`.
    pub fn steps(&self) -> usize {
        (self.meta.t_end / self.hydraulics.dt).floor() as usize
    }

    pub fn dt(&self) -> f64 {
        self.hydraulics.dt
    }
}

/// Which conduction model the loop drives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    #[default]
    OneD,
    TwoD,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaDef {
    #[serde(default = "default_case_name")]
    pub case_name: String,
    /// End time (s).
    pub t_end: f64,
    /// Power-to-source factor: `q = n·Fp` (W/m³).
    #[serde(rename = "Fp", default = "default_power_factor")]
    pub power_factor: f64,
    #[serde(default)]
    pub structure: StructureKind,
}

fn default_case_name() -> String {
    "msr_case".to_string()
}

fn default_power_factor() -> f64 {
    1.0
}

/// 1D structure on the loop grid (`hydraulics.N` nodes spaced `hydraulics.dr`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thermal1dDef {
    pub geometry: Geometry,
    pub k: f64,
    /// Initial density; each step takes the loop density instead.
    pub rho: f64,
    pub cp: f64,
    pub init_temp: f64,
    /// `[left, right]`
    pub bc: [BoundarySpec; 2],
}

impl Default for Thermal1dDef {
    fn default() -> Self {
        Self {
            geometry: Geometry::Cylindrical,
            k: 10.0,
            rho: 1800.0,
            cp: 1500.0,
            init_temp: 900.0,
            bc: [
                BoundarySpec::Dirichlet { value: 300.0 },
                BoundarySpec::Dirichlet { value: 300.0 },
            ],
        }
    }
}

/// Cylindrical axial × radial structure. Axial rows line up with the loop
/// cells, so `nz` must equal `hydraulics.N` and `rho` is only the initial
/// density.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thermal2dDef {
    pub nr: usize,
    pub nz: usize,
    pub dr: f64,
    pub dz: f64,
    pub k: f64,
    pub rho: f64,
    pub cp: f64,
    pub init_temp: f64,
    /// `[inner, outer]`
    pub bc_r: [BoundarySpec; 2],
    /// `[bottom, top]`
    pub bc_z: [BoundarySpec; 2],
}

impl Default for Thermal2dDef {
    fn default() -> Self {
        Self {
            nr: 10,
            nz: 10,
            dr: 0.01,
            dz: 0.01,
            k: 10.0,
            rho: 1800.0,
            cp: 1500.0,
            init_temp: 900.0,
            bc_r: [
                BoundarySpec::Symmetry,
                BoundarySpec::Robin {
                    h: 100.0,
                    ambient: 600.0,
                },
            ],
            bc_z: [
                BoundarySpec::Dirichlet { value: 800.0 },
                BoundarySpec::Dirichlet { value: 800.0 },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HydraulicsDef {
    /// Cells along the loop.
    #[serde(rename = "N")]
    pub n: usize,
    /// Cell spacing (m).
    pub dr: f64,
    /// Time step shared by every module (s).
    pub dt: f64,
    pub rho_salt: f64,
    pub u0: f64,
    pub p0: f64,
    #[serde(rename = "H0")]
    pub h0: f64,
    pub inlet: FlowBoundary,
    pub outlet: FlowBoundary,
    #[serde(flatten)]
    pub params: HydraulicsParams,
}

impl Default for HydraulicsDef {
    fn default() -> Self {
        Self {
            n: 5,
            dr: 0.01,
            dt: 0.01,
            rho_salt: 1800.0,
            u0: 1.0,
            p0: 1.0e5,
            h0: 2.0e5,
            inlet: FlowBoundary::Hold,
            outlet: FlowBoundary::Hold,
            params: HydraulicsParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlDef {
    /// Outlet temperature setpoint (K).
    #[serde(rename = "T_ref")]
    pub t_ref: f64,
    /// Normalised power setpoint.
    pub n_ref: f64,
    #[serde(flatten)]
    pub supervisor: SupervisorConfig,
}

impl Default for ControlDef {
    fn default() -> Self {
        Self {
            t_ref: 950.0,
            n_ref: 1.0,
            supervisor: SupervisorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecorderDef {
    pub output_dir: String,
    /// Scalar series to keep; empty keeps all.
    pub scalar_keys: Vec<String>,
    /// Array snapshots to keep; empty keeps all.
    pub array_keys: Vec<String>,
}

impl Default for RecorderDef {
    fn default() -> Self {
        Self {
            output_dir: "outputs/run1".to_string(),
            scalar_keys: Vec::new(),
            array_keys: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydraulics_section_flattens_loop_parameters() {
        let yaml = "N: 8\ndr: 0.02\ndt: 0.005\nA: 0.05\nfriction: 0.01\ninlet:\n  kind: zero_gradient\n";
        let def: HydraulicsDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.n, 8);
        assert_eq!(def.params.area, 0.05);
        assert_eq!(def.params.valve_area, 0.01);
        assert_eq!(def.params.friction, 0.01);
        assert_eq!(def.inlet, FlowBoundary::ZeroGradient);
        assert_eq!(def.outlet, FlowBoundary::Hold);
    }

    #[test]
    fn control_section_keeps_setpoints_beside_controllers() {
        let yaml = "T_ref: 960\nanomaly_threshold: 2000\ntrip:\n  threshold: 1100\n";
        let def: ControlDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.t_ref, 960.0);
        assert_eq!(def.n_ref, 1.0);
        assert_eq!(def.supervisor.anomaly_threshold, 2000.0);
        assert_eq!(def.supervisor.trip.threshold, 1100.0);
        assert!(def.supervisor.trip.hold_state);
    }

    #[test]
    fn structure_kind_names() {
        let kind: StructureKind = serde_yaml::from_str("two_d").unwrap();
        assert_eq!(kind, StructureKind::TwoD);
    }
}
