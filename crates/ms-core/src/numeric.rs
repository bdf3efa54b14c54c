use crate::MsError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, MsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MsError::NonFinite { what, value: v })
    }
}

/// Check that a co-indexed field has the expected length.
pub fn ensure_len(len: usize, expected: usize, what: &'static str) -> Result<(), MsError> {
    if len == expected {
        Ok(())
    } else {
        Err(MsError::ShapeMismatch {
            what,
            expected,
            actual: len,
        })
    }
}

/// Harmonic mean of two conductivities, `2·a·b/(a+b)`.
///
/// No guard against `a + b == 0`; callers supply physical data.
#[inline]
pub fn harmonic_mean(a: Real, b: Real) -> Real {
    2.0 * a * b / (a + b)
}
