//! Point reactor kinetics for a circulating-fuel core.
//!
//! Provides:
//! - `PointKinetics`: explicit point-kinetics stepping with delayed-neutron
//!   precursors that leave the core and re-enter after a transport delay
//! - `PrecursorHistory`: fixed-capacity ring buffer of past precursor vectors
//! - `DecayHeatModel`: exponential fit of post-shutdown decay heat

pub mod decay;
pub mod error;
pub mod history;
pub mod point;

pub use decay::DecayHeatModel;
pub use error::{KineticsError, KineticsResult};
pub use history::PrecursorHistory;
pub use point::{KineticsParams, PointKinetics};
