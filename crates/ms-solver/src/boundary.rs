//! Boundary descriptors and geometry area factors.

use serde::{Deserialize, Serialize};

/// Coordinate system of a 1D conduction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    #[default]
    #[serde(alias = "cartesian")]
    Planar,
    #[serde(alias = "cylinder")]
    Cylindrical,
    #[serde(alias = "sphere")]
    Spherical,
}

impl Geometry {
    /// Face area factor at coordinate `x`: 1, x or x².
    #[inline]
    pub fn area_factor(self, x: f64) -> f64 {
        match self {
            Geometry::Planar => 1.0,
            Geometry::Cylindrical => x,
            Geometry::Spherical => x * x,
        }
    }
}

/// Boundary condition on one side of a conduction line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundarySpec {
    /// Prescribed temperature (K).
    Dirichlet { value: f64 },
    /// Prescribed heat flux (W/m²), encoded as a one-sided difference.
    Neumann { flux: f64 },
    /// Convective exchange with an ambient at `ambient` (K) through `h` (W/m²/K).
    Robin { h: f64, ambient: f64 },
    /// Zero-flux mirror.
    Symmetry,
}

/// Coefficients of a boundary row: `diag·T_edge + neighbor·T_inner = rhs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryRow {
    pub diag: f64,
    pub neighbor: f64,
    pub rhs: f64,
}

impl BoundarySpec {
    /// Row coefficients for this side, given the conductivity at the edge node and
    /// the grid spacing. The same encoding serves both ends of a line.
    pub fn row(&self, k_edge: f64, spacing: f64) -> BoundaryRow {
        match *self {
            BoundarySpec::Dirichlet { value } => BoundaryRow {
                diag: 1.0,
                neighbor: 0.0,
                rhs: value,
            },
            BoundarySpec::Neumann { flux } => BoundaryRow {
                diag: 1.0,
                neighbor: -1.0,
                rhs: spacing * flux / k_edge,
            },
            BoundarySpec::Robin { h, ambient } => BoundaryRow {
                diag: k_edge / spacing + h,
                neighbor: -k_edge / spacing,
                rhs: h * ambient,
            },
            BoundarySpec::Symmetry => BoundaryRow {
                diag: 1.0,
                neighbor: -1.0,
                rhs: 0.0,
            },
        }
    }
}
