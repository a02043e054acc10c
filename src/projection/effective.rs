//! Static effective-rate calculation
//!
//! Folds the scenario's categorical and numeric deltas into a single bounded
//! annual rate. Used only by the non-chained baseline projection; the dynamics
//! engine builds its rate per year instead.

use crate::scenario::PredictionInput;

/// Weights applied to each scenario factor
#[derive(Debug, Clone)]
pub struct RateWeights {
    pub birth: f64,
    pub death: f64,
    pub migration: f64,
    pub economic: f64,
    pub conflict: f64,
    pub support: f64,
}

impl Default for RateWeights {
    fn default() -> Self {
        Self {
            birth: 0.002,
            death: 0.002,
            migration: 0.001,
            economic: 0.0003,
            conflict: 0.0015,
            support: 0.0008,
        }
    }
}

/// Bounds on the effective annual rate
pub const RATE_FLOOR: f64 = -0.02;
pub const RATE_CEILING: f64 = 0.02;

/// Effective static rate: base rate plus tanh-saturated scenario deltas
///
/// Percent deltas saturate through tanh(x/10) so extreme slider values cannot
/// dominate the rate; the result is clamped to [-2%, +2%].
pub fn effective_rate(base_rate: f64, input: &PredictionInput, weights: &RateWeights) -> f64 {
    let rate = base_rate
        + weights.birth * (input.birth_rate_change / 10.0).tanh()
        - weights.death * (input.death_rate_change / 10.0).tanh()
        + weights.migration * (input.migration_change / 10.0).tanh()
        + weights.economic * input.economic_situation.effect()
        - weights.conflict * input.conflict_intensity.effect()
        + weights.support * input.family_support.effect();

    rate.clamp(RATE_FLOOR, RATE_CEILING)
}
