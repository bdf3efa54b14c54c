//! Implicit heat-conduction solvers for reactor structures.
//!
//! Every conduction step reduces to one or more tridiagonal systems, solved with
//! the Thomas algorithm in [`tridiag`]. The 1D solver assembles a single system per
//! call; the 2D solver splits the cylindrical (axial × radial) problem into a radial
//! sweep followed by an axial sweep.

pub mod boundary;
pub mod conduction;
pub mod error;
pub mod field;
pub mod tridiag;

pub use boundary::{BoundaryRow, BoundarySpec, Geometry};
pub use conduction::{solve_1d, solve_2d};
pub use error::{SolverError, SolverResult};
pub use field::{ConductionField1d, ConductionField2d};
pub use tridiag::TridiagonalSystem;
