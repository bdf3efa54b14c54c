//! One explicit upwind finite-volume sub-step.
//!
//! Only interior cells `1..N-1` are advanced; every flux is evaluated from the
//! previous time level. The linearised equation of state is evaluated per cell
//! and handed back in [`HydraulicsStep`], but the state keeps the density from
//! the continuity equation.

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::state::HydraulicState;
use serde::{Deserialize, Serialize};

/// Linearised equation-of-state slopes `∂ρ/∂H` and `∂ρ/∂p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EosSlopes {
    pub drho_dh: f64,
    pub drho_dp: f64,
}

impl Default for EosSlopes {
    fn default() -> Self {
        Self {
            drho_dh: -1.0e-4,
            drho_dp: 1.0e-5,
        }
    }
}

/// Scalar loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicsParams {
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Sine of the flow-path inclination.
    pub sin_theta: f64,
    /// Flow cross-section (m²).
    #[serde(rename = "A")]
    pub area: f64,
    /// Valve/vent area used for the face fluxes (m²).
    #[serde(rename = "Av")]
    pub valve_area: f64,
    /// Linear friction coefficient (kg/m³/s).
    pub friction: f64,
    /// Pump head (m), spread uniformly over the loop length.
    pub pump_head: f64,
    pub eos: EosSlopes,
}

impl Default for HydraulicsParams {
    fn default() -> Self {
        Self {
            g: 9.81,
            sin_theta: 0.0,
            area: 0.01,
            valve_area: 0.01,
            friction: 0.0,
            pump_head: 0.0,
            eos: EosSlopes::default(),
        }
    }
}

/// Diagnostics from one sub-step.
#[derive(Debug, Clone, PartialEq)]
pub struct HydraulicsStep {
    /// Density the linearised EOS would give for each cell. Boundary entries
    /// repeat the state density. Never applied to the state.
    pub eos_density: Vec<f64>,
}

/// First-order upwind selection on the face velocity sign.
#[inline]
pub fn upstream(left: f64, right: f64, u: f64) -> f64 {
    if u >= 0.0 { left } else { right }
}

/// Advance `state` by one explicit sub-step of size `dt` on a grid of spacing `dx`.
pub fn update_hydraulics(
    state: &mut HydraulicState,
    dx: f64,
    dt: f64,
    params: &HydraulicsParams,
) -> HydraulicsResult<HydraulicsStep> {
    if dx <= 0.0 || dt <= 0.0 {
        return Err(HydraulicsError::InvalidArg {
            what: "dx and dt must be positive",
        });
    }
    if params.area <= 0.0 {
        return Err(HydraulicsError::InvalidArg {
            what: "flow area must be positive",
        });
    }

    let n = state.len();
    let rho = state.density().to_vec();
    let u = state.velocity().to_vec();
    let p = state.pressure().to_vec();
    let h = state.enthalpy().to_vec();

    let av = params.valve_area;
    let loop_length = (n - 1) as f64 * dx;
    let mut eos_density = rho.clone();

    let (rho_new, u_new, _, h_new) = state.fields_mut();
    for i in 1..n - 1 {
        // Continuity
        let mass_in = upstream(rho[i - 1], rho[i], u[i - 1]) * u[i - 1] * av;
        let mass_out = upstream(rho[i], rho[i + 1], u[i]) * u[i] * av;
        rho_new[i] += -(mass_out - mass_in) / dx * dt;

        // Momentum
        let flux_w = rho[i - 1] * u[i - 1] * u[i - 1] + p[i - 1];
        let flux_p = rho[i] * u[i] * u[i] + p[i];
        let du_dt = (-(flux_p - flux_w) / dx - rho[i] * params.g * params.sin_theta
            - params.friction * u[i]
            + rho[i] * params.g * params.pump_head / loop_length)
            / rho[i];
        u_new[i] += du_dt * dt;

        // Energy
        let energy_in = upstream(rho[i - 1] * h[i - 1], rho[i] * h[i], u[i - 1]) * u[i - 1] * av;
        let energy_out = upstream(rho[i] * h[i], rho[i + 1] * h[i + 1], u[i]) * u[i] * av;
        let dh_dt = -(energy_out - energy_in) / (rho[i] * params.area * dx);
        h_new[i] += dh_dt * dt;

        // EOS candidate, not fed back
        eos_density[i] = rho[i]
            + params.eos.drho_dh * (h_new[i] - h[i])
            + params.eos.drho_dp * (p[i] - p[i]);
    }
    eos_density[0] = rho_new[0];
    eos_density[n - 1] = rho_new[n - 1];

    Ok(HydraulicsStep { eos_density })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_follows_velocity_sign() {
        assert_eq!(upstream(1.0, 2.0, 0.5), 1.0);
        assert_eq!(upstream(1.0, 2.0, 0.0), 1.0);
        assert_eq!(upstream(1.0, 2.0, -0.5), 2.0);
    }

    #[test]
    fn uniform_flow_is_steady() {
        let mut state = HydraulicState::uniform(6, 1800.0, 1.0, 1e5, 2e5).unwrap();
        let before = state.clone();
        let step = update_hydraulics(&mut state, 0.01, 0.01, &HydraulicsParams::default()).unwrap();
        assert_eq!(state, before);
        for rho in &step.eos_density {
            assert!((rho - 1800.0).abs() < 1e-12);
        }
    }

    #[test]
    fn boundary_cells_are_untouched() {
        let mut state = HydraulicState::new(
            vec![1800.0, 1790.0, 1810.0, 1805.0, 1795.0],
            vec![0.5, 1.0, 1.5, -0.5, 2.0],
            vec![1.2e5, 1.1e5, 1.0e5, 0.9e5, 0.8e5],
            vec![2.0e5, 2.1e5, 2.2e5, 2.3e5, 2.4e5],
        )
        .unwrap();
        let before = state.clone();
        update_hydraulics(&mut state, 0.1, 1e-3, &HydraulicsParams::default()).unwrap();

        for last in [0, 4] {
            assert_eq!(state.density()[last], before.density()[last]);
            assert_eq!(state.velocity()[last], before.velocity()[last]);
            assert_eq!(state.enthalpy()[last], before.enthalpy()[last]);
        }
        assert_eq!(state.pressure(), before.pressure());
        assert_ne!(state.density()[2], before.density()[2]);
    }

    #[test]
    fn continuity_uses_upwind_density() {
        // flow to the right: cell 2 receives cell 1's density and loses its own
        let mut state = HydraulicState::new(
            vec![1000.0, 1000.0, 2000.0, 2000.0],
            vec![1.0; 4],
            vec![1e5; 4],
            vec![2e5; 4],
        )
        .unwrap();
        let params = HydraulicsParams {
            valve_area: 1.0,
            ..HydraulicsParams::default()
        };
        update_hydraulics(&mut state, 1.0, 0.1, &params).unwrap();
        // drho/dt = -(2000 - 1000) / 1 → -1000, times dt
        assert!((state.density()[2] - 1900.0).abs() < 1e-9);
        // cell 1 sees equal in/out fluxes
        assert!((state.density()[1] - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn pressure_gradient_accelerates_flow_and_eos_is_not_applied() {
        let mut state = HydraulicState::new(
            vec![1800.0; 5],
            vec![0.0; 5],
            vec![2.0e5, 1.9e5, 1.8e5, 1.7e5, 1.6e5],
            vec![2e5; 5],
        )
        .unwrap();
        let step = update_hydraulics(&mut state, 0.1, 1e-3, &HydraulicsParams::default()).unwrap();
        // -(Δp)/dx / ρ = 1e4 / 0.1 / 1800
        let expected = 1.0e5 / 1800.0 * 1e-3;
        assert!((state.velocity()[2] - expected).abs() < 1e-9);
        // at rest there is no enthalpy change, so the candidate equals the state
        assert_eq!(step.eos_density, state.density().to_vec());
    }

    #[test]
    fn gravity_and_friction_decelerate() {
        let mut state = HydraulicState::uniform(5, 1800.0, 1.0, 1e5, 2e5).unwrap();
        let params = HydraulicsParams {
            sin_theta: 1.0,
            friction: 18.0,
            ..HydraulicsParams::default()
        };
        update_hydraulics(&mut state, 0.1, 1e-2, &params).unwrap();
        let expected = 1.0 + (-1800.0 * 9.81 - 18.0) / 1800.0 * 1e-2;
        assert!((state.velocity()[2] - expected).abs() < 1e-12);
    }

    #[test]
    fn invalid_steps_are_rejected() {
        let mut state = HydraulicState::uniform(5, 1800.0, 1.0, 1e5, 2e5).unwrap();
        let params = HydraulicsParams::default();
        assert!(update_hydraulics(&mut state, 0.0, 0.1, &params).is_err());
        assert!(update_hydraulics(&mut state, 0.1, 0.0, &params).is_err());
    }
}
