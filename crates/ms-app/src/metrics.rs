//! Control performance metrics for a recorded response.
//!
//! Computes steady-state error, overshoot, settling time and rise time of a
//! measured series against a constant reference.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Relative band used for settling time unless the caller picks another.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Samples averaged for the steady-state error.
const STEADY_WINDOW: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ControlMetrics {
    /// Mean |y - ref| over the last samples.
    pub steady_state_error: Option<f64>,
    /// Peak above the reference, in percent of the reference. Negative when
    /// the response never reaches it.
    pub overshoot_pct: Option<f64>,
    /// First time after which |y - ref| stays strictly inside `tol·|ref|`.
    pub settling_time_s: Option<f64>,
    /// Time between the 10 % and 90 % crossings of the initial-to-reference
    /// span.
    pub rise_time_s: Option<f64>,
}

impl ControlMetrics {
    pub fn has_data(&self) -> bool {
        self.steady_state_error.is_some()
            || self.overshoot_pct.is_some()
            || self.settling_time_s.is_some()
            || self.rise_time_s.is_some()
    }
}

fn fmt_opt(f: &mut fmt::Formatter<'_>, label: &str, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{label}: {v:.3}"),
        None => writeln!(f, "{label}: n/a"),
    }
}

impl fmt::Display for ControlMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_opt(f, "Steady-state error", self.steady_state_error)?;
        fmt_opt(f, "Overshoot (%)", self.overshoot_pct)?;
        fmt_opt(f, "Settling time (s)", self.settling_time_s)?;
        fmt_opt(f, "Rise time (s)", self.rise_time_s)
    }
}

/// Evaluate `values` sampled at `times` against a constant `reference`.
///
/// An empty series gives empty metrics.
pub fn evaluate(
    times: &[f64],
    values: &[f64],
    reference: f64,
    tolerance: f64,
) -> AppResult<ControlMetrics> {
    if times.len() != values.len() {
        return Err(AppError::InvalidInput(format!(
            "{} times for {} values",
            times.len(),
            values.len()
        )));
    }
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(AppError::InvalidInput(format!(
            "tolerance must be positive, got {tolerance}"
        )));
    }
    if values.is_empty() {
        return Ok(ControlMetrics::default());
    }

    let tail = &values[values.len().saturating_sub(STEADY_WINDOW)..];
    let steady_state_error =
        tail.iter().map(|y| (y - reference).abs()).sum::<f64>() / tail.len() as f64;

    let overshoot_pct = if reference.abs() > f64::EPSILON {
        let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((peak - reference) / reference.abs() * 100.0)
    } else {
        None
    };

    Ok(ControlMetrics {
        steady_state_error: Some(steady_state_error),
        overshoot_pct,
        settling_time_s: settling_time(times, values, reference, tolerance),
        rise_time_s: rise_time(times, values, reference),
    })
}

fn settling_time(times: &[f64], values: &[f64], reference: f64, tolerance: f64) -> Option<f64> {
    let band = tolerance * reference.abs();
    let first_inside = match values
        .iter()
        .rposition(|y| (y - reference).abs() >= band)
    {
        Some(last_outside) => last_outside + 1,
        None => 0,
    };
    times.get(first_inside).copied()
}

fn rise_time(times: &[f64], values: &[f64], reference: f64) -> Option<f64> {
    let start = values[0];
    let span = reference - start;
    if span.abs() < 1e-12 {
        return None;
    }
    let crossing = |fraction: f64| {
        values
            .iter()
            .position(|y| (y - start) / span >= fraction)
            .map(|i| times[i])
    };
    Some(crossing(0.9)? - crossing(0.1)?)
}
