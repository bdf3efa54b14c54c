//! Supervisory control for the reactor loop.
//!
//! The supervisor turns sensor readings into two actuator commands each step:
//! a reactivity insertion and a heat-removal capability `U`.
//!
//! # Architecture
//!
//! - **Trip logic** latches a SCRAM when the outlet temperature crosses its
//!   threshold; while tripped the reactivity command is the fixed SCRAM value
//! - **Incremental PIDs** drive reactivity from the power error and `U` from the
//!   outlet temperature error
//! - **Predictive controller** takes over `U` for the rest of the run once the
//!   heat-removal PID output jumps by more than the anomaly threshold
//! - **Fallback**: a failed `U` computation is replaced by a fixed command for
//!   that step only
//!
//! Everything the supervisor decides is appended to a caller-owned
//! [`ControlLog`].

pub mod error;
pub mod log;
pub mod pid;
pub mod predictive;
pub mod supervisor;
pub mod trip;

pub use error::{ControlError, ControlResult};
pub use log::{ControlEvent, ControlLog, ControlRecord};
pub use pid::{IncrementalPid, PidConfig};
pub use predictive::{MpcConfig, PredictiveController};
pub use supervisor::{
    CommandSource, ControlCommands, ControlMode, ControlSupervisor, Sensors, SupervisorConfig,
};
pub use trip::{TripConfig, TripLogic, TripMode};
