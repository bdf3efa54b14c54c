//! Thomas algorithm for tridiagonal linear systems.
//!
//! Band layout follows the usual convention: `sub` has length n-1 and holds
//! `A[i+1][i]`, `diag` has length n, `sup` has length n-1 and holds `A[i][i+1]`.
//!
//! No pivoting is performed. The system must be at least weakly diagonally
//! dominant; otherwise the result is numerically unreliable and no error is raised.

use crate::error::{SolverError, SolverResult};
use ms_core::ensure_len;
use nalgebra::{DMatrix, DVector};

fn check_bands(sub: &[f64], diag: &[f64], sup: &[f64], rhs_len: usize) -> SolverResult<usize> {
    let n = diag.len();
    if n == 0 {
        return Err(SolverError::InvalidArg {
            what: "tridiagonal system must have at least one row",
        });
    }
    ensure_len(sub.len(), n - 1, "sub-diagonal")?;
    ensure_len(sup.len(), n - 1, "super-diagonal")?;
    ensure_len(rhs_len, n, "right-hand side")?;
    Ok(n)
}

/// Solve `A·x = d` for a single right-hand side.
pub fn solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> SolverResult<Vec<f64>> {
    let n = check_bands(sub, diag, sup, rhs.len())?;

    // Forward sweep: scaled super-diagonal and rhs
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if n > 1 {
        c_prime[0] = sup[0] / diag[0];
    }
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let pivot = diag[i] - sub[i - 1] * c_prime[i - 1];
        if i < n - 1 {
            c_prime[i] = sup[i] / pivot;
        }
        d_prime[i] = (rhs[i] - sub[i - 1] * d_prime[i - 1]) / pivot;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

/// Solve `A·X = D` where `D` is n×m: m independent systems sharing one matrix.
pub fn solve_batch(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &DMatrix<f64>,
) -> SolverResult<DMatrix<f64>> {
    let n = check_bands(sub, diag, sup, rhs.nrows())?;
    let m = rhs.ncols();

    let mut x = DMatrix::zeros(n, m);
    for j in 0..m {
        let column: Vec<f64> = rhs.column(j).iter().copied().collect();
        let solved = solve(sub, diag, sup, &column)?;
        x.set_column(j, &DVector::from_vec(solved));
    }
    Ok(x)
}

/// Owned tridiagonal system, filled row by row during assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
    pub rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// All-zero system with `n` rows.
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: vec![0.0; n.saturating_sub(1)],
            diag: vec![0.0; n],
            sup: vec![0.0; n.saturating_sub(1)],
            rhs: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    pub fn solve(&self) -> SolverResult<Vec<f64>> {
        solve(&self.sub, &self.diag, &self.sup, &self.rhs)
    }

    /// Matrix-vector product `A·x`.
    pub fn apply(&self, x: &[f64]) -> SolverResult<Vec<f64>> {
        let n = self.len();
        ensure_len(x.len(), n, "vector")?;
        let mut out = vec![0.0; n];
        for i in 0..n {
            let mut acc = self.diag[i] * x[i];
            if i > 0 {
                acc += self.sub[i - 1] * x[i - 1];
            }
            if i + 1 < n {
                acc += self.sup[i] * x[i + 1];
            }
            out[i] = acc;
        }
        Ok(out)
    }
}
