//! Point kinetics with precursor drift and recirculation.
//!
//! Precursors are carried out of the core by the fuel salt and return after the
//! loop transport delay `tau`, attenuated by `e^{-λ_i·τ}` and spread over the
//! core transit time `T_c`:
//!
//! ```text
//! dC_i/dt = (β_i/Λ)·n − λ_i·C_i + (e^{−λ_i·τ}/T_c)·C_i(t−τ)
//! dn/dt   = ((ρ − Σβ_i)/Λ)·n + Σ λ_i·C_i
//! ```
//!
//! Both equations are advanced with explicit Euler. `C` is updated first and the
//! neutron equation uses the updated `C`. There is no stability control; keep
//! `dt` well below `Λ/Σβ_i`.

use crate::error::{KineticsError, KineticsResult};
use crate::history::PrecursorHistory;
use ms_core::ensure_len;
use serde::{Deserialize, Serialize};

/// Delayed-neutron group data and loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticsParams {
    /// Delayed-neutron fraction per group.
    pub beta_i: Vec<f64>,
    /// Precursor decay constant per group (1/s).
    pub lambda_i: Vec<f64>,
    /// Prompt neutron generation time (s).
    #[serde(rename = "Lambda")]
    pub generation_time: f64,
    /// Core transit time (s).
    #[serde(rename = "T_c")]
    pub transit_time: f64,
    /// Out-of-core transport delay (s).
    pub tau: f64,
}

impl KineticsParams {
    pub fn groups(&self) -> usize {
        self.beta_i.len()
    }

    pub fn beta_total(&self) -> f64 {
        self.beta_i.iter().sum()
    }

    /// Steady-state precursor vector `β_i/(Λ·λ_i)` for unit neutron density.
    pub fn equilibrium_precursors(&self) -> Vec<f64> {
        self.beta_i
            .iter()
            .zip(&self.lambda_i)
            .map(|(beta, lambda)| beta / (self.generation_time * lambda))
            .collect()
    }

    pub fn validate(&self) -> KineticsResult<()> {
        if self.beta_i.is_empty() {
            return Err(KineticsError::InvalidArg {
                what: "at least one delayed-neutron group is required",
            });
        }
        ensure_len(self.lambda_i.len(), self.beta_i.len(), "lambda_i")?;
        if self.generation_time <= 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "Lambda must be positive",
            });
        }
        if self.lambda_i.iter().any(|l| *l <= 0.0) {
            return Err(KineticsError::InvalidArg {
                what: "every lambda_i must be positive",
            });
        }
        if self.transit_time <= 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "T_c must be positive",
            });
        }
        if self.tau < 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "tau must be non-negative",
            });
        }
        Ok(())
    }
}

/// Kinetics state owned by the engine.
#[derive(Debug, Clone)]
pub struct PointKinetics {
    params: KineticsParams,
    dt: f64,
    delay_steps: usize,
    beta_total: f64,
    /// `e^{−λ_i·τ}/T_c`, fixed for the run.
    return_weight: Vec<f64>,
    n: f64,
    precursors: Vec<f64>,
    history: PrecursorHistory,
}

impl PointKinetics {
    /// Start from the critical steady state: `n = 1`, `C_i = β_i/(Λ·λ_i)`, and a
    /// history of `⌊τ/dt⌋ + 2` copies of that vector.
    pub fn new(params: KineticsParams, dt: f64) -> KineticsResult<Self> {
        params.validate()?;
        if dt <= 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "dt must be positive",
            });
        }

        let delay_steps = (params.tau / dt).floor() as usize;
        let precursors = params.equilibrium_precursors();
        let history = PrecursorHistory::filled(delay_steps + 2, &precursors)?;
        let return_weight = params
            .lambda_i
            .iter()
            .map(|lambda| (-lambda * params.tau).exp() / params.transit_time)
            .collect();

        Ok(Self {
            beta_total: params.beta_total(),
            params,
            dt,
            delay_steps,
            return_weight,
            n: 1.0,
            precursors,
            history,
        })
    }

    /// Advance one step under reactivity `rho` and return `(n, C)`.
    ///
    /// `n` is not clamped; a negative value signals a too-large step.
    pub fn step(&mut self, rho: f64) -> (f64, Vec<f64>) {
        let n = self.n;
        let gen_time = self.params.generation_time;

        // The history starts full and never shrinks.
        let delayed = self.history.delayed(self.delay_steps);
        for (i, c) in self.precursors.iter_mut().enumerate() {
            let dc_dt = self.params.beta_i[i] / gen_time * n - self.params.lambda_i[i] * *c
                + self.return_weight[i] * delayed[i];
            *c += dc_dt * self.dt;
        }

        let source: f64 = self
            .params
            .lambda_i
            .iter()
            .zip(&self.precursors)
            .map(|(lambda, c)| lambda * c)
            .sum();
        let dn_dt = (rho - self.beta_total) / gen_time * n + source;
        self.n += dn_dt * self.dt;

        self.history.record(&self.precursors);

        (self.n, self.precursors.clone())
    }

    /// Neutron density, normalised to the initial steady state.
    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn precursors(&self) -> &[f64] {
        &self.precursors
    }

    pub fn history(&self) -> &PrecursorHistory {
        &self.history
    }

    pub fn params(&self) -> &KineticsParams {
        &self.params
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Transport delay in whole steps, `⌊τ/dt⌋`.
    pub fn delay_steps(&self) -> usize {
        self.delay_steps
    }

    pub fn beta_total(&self) -> f64 {
        self.beta_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_group(transit_time: f64) -> KineticsParams {
        KineticsParams {
            beta_i: vec![0.0065],
            lambda_i: vec![0.08],
            generation_time: 1e-4,
            transit_time,
            tau: 0.05,
        }
    }

    #[test]
    fn starts_at_equilibrium_with_full_history() {
        let pk = PointKinetics::new(one_group(2.0), 0.01).unwrap();
        assert_eq!(pk.n(), 1.0);
        assert_eq!(pk.delay_steps(), 5);
        assert_eq!(pk.history().capacity(), 7);
        assert_eq!(pk.history().len(), 7);
        let expected = 0.0065 / (1e-4 * 0.08);
        assert!((pk.precursors()[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn first_step_matches_hand_computation() {
        let params = one_group(2.0);
        let dt = 1e-3;
        let mut pk = PointKinetics::new(params.clone(), dt).unwrap();
        let c0 = params.equilibrium_precursors()[0];

        let (n, c) = pk.step(0.001);

        // production and decay cancel at equilibrium; only the returning term remains
        let c1 = c0 + dt * ((-0.08_f64 * 0.05).exp() / 2.0 * c0);
        assert!((c[0] - c1).abs() < 1e-9);
        let n1 = 1.0 + dt * ((0.001 - 0.0065) / 1e-4 + 0.08 * c1);
        assert!((n - n1).abs() < 1e-12);
        assert_eq!(pk.history().newest(), Some(&c[..]));
    }

    #[test]
    fn returning_precursors_arrive_after_the_loop_delay() {
        // tau = 0.05 s at dt = 0.01 s: the return term reads the vector from five steps back
        let mut pk = PointKinetics::new(one_group(2.0), 0.01).unwrap();
        let mut pushed = Vec::new();
        for _ in 0..12 {
            let (_, c) = pk.step(0.002);
            pushed.push(c);
            assert_eq!(pk.history().len(), 7);
            assert_eq!(pk.history().newest(), Some(pk.precursors()));
        }
        let lagged = pk.history().lagged(pk.delay_steps()).unwrap();
        assert_eq!(lagged, &pushed[pushed.len() - 5][..]);
    }

    #[test]
    fn negative_reactivity_drops_power() {
        let mut pk = PointKinetics::new(one_group(1e9), 1e-4).unwrap();
        for _ in 0..1000 {
            pk.step(-0.005);
        }
        assert!(pk.n() < 0.6);
        assert!(pk.n() > 0.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut p = one_group(2.0);
        p.generation_time = 0.0;
        assert!(PointKinetics::new(p, 0.01).is_err());

        let mut p = one_group(2.0);
        p.lambda_i = vec![0.08, 0.1];
        assert!(matches!(
            PointKinetics::new(p, 0.01),
            Err(KineticsError::Groups(_))
        ));

        let mut p = one_group(2.0);
        p.tau = -1.0;
        assert!(PointKinetics::new(p, 0.01).is_err());

        assert!(PointKinetics::new(one_group(0.0), 0.01).is_err());
        assert!(PointKinetics::new(one_group(2.0), 0.0).is_err());
    }

    #[test]
    fn params_use_card_field_names() {
        let json = r#"{"beta_i":[0.0065],"lambda_i":[0.08],"Lambda":1e-4,"T_c":2.0,"tau":4.0}"#;
        let params: KineticsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.generation_time, 1e-4);
        assert_eq!(params.transit_time, 2.0);
        assert_eq!(params.groups(), 1);
    }
}
