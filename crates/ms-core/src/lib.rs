//! ms-core: shared foundation for msrsim.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finiteness, length and averaging helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{MsError, MsResult};
pub use numeric::*;
pub use units::*;
