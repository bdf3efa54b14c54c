//! Boundary routines for the first and last flow cells.
//!
//! [`update_hydraulics`](crate::update_hydraulics) leaves both end cells alone;
//! the orchestrator sets them here after each sub-step.

use crate::state::HydraulicState;
use serde::{Deserialize, Serialize};

/// Treatment of one end of the flow path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowBoundary {
    /// Keep whatever the cell already holds.
    #[default]
    Hold,
    /// Impose a fixed thermodynamic and kinematic state.
    Fixed {
        density: f64,
        velocity: f64,
        pressure: f64,
        enthalpy: f64,
    },
    /// Copy the adjacent interior cell.
    ZeroGradient,
}

impl FlowBoundary {
    fn apply(&self, state: &mut HydraulicState, cell: usize, neighbor: usize) {
        let (rho, u, p, h) = state.fields_mut();
        match *self {
            FlowBoundary::Hold => {}
            FlowBoundary::Fixed {
                density,
                velocity,
                pressure,
                enthalpy,
            } => {
                rho[cell] = density;
                u[cell] = velocity;
                p[cell] = pressure;
                h[cell] = enthalpy;
            }
            FlowBoundary::ZeroGradient => {
                rho[cell] = rho[neighbor];
                u[cell] = u[neighbor];
                p[cell] = p[neighbor];
                h[cell] = h[neighbor];
            }
        }
    }
}

/// Set the inlet (first) and outlet (last) cells.
pub fn apply_flow_boundaries(
    state: &mut HydraulicState,
    inlet: &FlowBoundary,
    outlet: &FlowBoundary,
) {
    let last = state.len() - 1;
    inlet.apply(state, 0, 1);
    outlet.apply(state, last, last - 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_inlet_and_zero_gradient_outlet() {
        let mut state = HydraulicState::new(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.1, 0.2, 0.3, 0.4],
            vec![10.0, 20.0, 30.0, 40.0],
            vec![100.0, 200.0, 300.0, 400.0],
        )
        .unwrap();
        let inlet = FlowBoundary::Fixed {
            density: 1800.0,
            velocity: 1.0,
            pressure: 1e5,
            enthalpy: 2e5,
        };
        apply_flow_boundaries(&mut state, &inlet, &FlowBoundary::ZeroGradient);

        assert_eq!(state.density(), &[1800.0, 2.0, 3.0, 3.0]);
        assert_eq!(state.velocity(), &[1.0, 0.2, 0.3, 0.3]);
        assert_eq!(state.pressure(), &[1e5, 20.0, 30.0, 30.0]);
        assert_eq!(state.enthalpy(), &[2e5, 200.0, 300.0, 300.0]);
    }

    #[test]
    fn hold_changes_nothing() {
        let mut state = HydraulicState::uniform(4, 1800.0, 1.0, 1e5, 2e5).unwrap();
        let before = state.clone();
        apply_flow_boundaries(&mut state, &FlowBoundary::Hold, &FlowBoundary::Hold);
        assert_eq!(state, before);
    }
}
