//! Explicit 1D single-phase thermal-hydraulics for the salt loop.
//!
//! Provides:
//! - co-indexed flow state (density, velocity, pressure, enthalpy)
//! - one explicit upwind finite-volume sub-step on interior cells
//! - boundary routines for the first and last cells

pub mod boundary;
pub mod error;
pub mod state;
pub mod update;

pub use boundary::{FlowBoundary, apply_flow_boundaries};
pub use error::{HydraulicsError, HydraulicsResult};
pub use state::HydraulicState;
pub use update::{EosSlopes, HydraulicsParams, HydraulicsStep, update_hydraulics, upstream};
