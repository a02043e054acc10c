//! Non-chained baseline projection
//!
//! Every year is an independent single-step prediction recomputed from the
//! fixed base population. This is deliberately NOT a simulation trajectory;
//! the chained dynamics engine lives in `dynamics.rs` and the two must stay
//! separate algorithms.

use super::effective::{effective_rate, RateWeights};
use super::series::PopulationPoint;
use crate::factors::MacroIndicators;
use crate::scenario::PredictionInput;

/// Relative width of the uncertainty band attached to every point
pub const BAND_WIDTH: f64 = 0.03;

/// Produces the per-year exponential-logistic reference series
#[derive(Debug, Clone, Default)]
pub struct BaselineProjector {
    weights: RateWeights,
}

impl BaselineProjector {
    pub fn new(weights: RateWeights) -> Self {
        Self { weights }
    }

    /// Single-step static prediction for one target year
    pub fn predict_year(
        &self,
        base_population: f64,
        base_rate: f64,
        input: &PredictionInput,
        carrying_capacity: f64,
        macros: &MacroIndicators,
        year: i32,
    ) -> f64 {
        let truncated = input.truncated_to(year);
        let r_eff = effective_rate(base_rate, &truncated, &self.weights);

        let delta_years = (year - input.base_year) as f64;
        let p_exp = base_population * (r_eff * delta_years).exp();

        let logistic_term = 1.0 - base_population / carrying_capacity;
        let safe_logistic = sigmoid(logistic_term);
        let p_log = p_exp * safe_logistic.powf(-0.3);

        let world_influence = 1.0 + macros.sentiment * 0.02;
        p_log * world_influence
    }

    /// Independent predictions for every year of the horizon, with ±3% bands
    pub fn project(
        &self,
        base_population: f64,
        base_rate: f64,
        input: &PredictionInput,
        carrying_capacity: f64,
        macros: &MacroIndicators,
    ) -> Vec<PopulationPoint> {
        (input.base_year + 1..=input.target_year)
            .map(|year| {
                let predicted = self.predict_year(
                    base_population,
                    base_rate,
                    input,
                    carrying_capacity,
                    macros,
                    year,
                );
                PopulationPoint {
                    lower_bound: Some((predicted * (1.0 - BAND_WIDTH)).round()),
                    upper_bound: Some((predicted * (1.0 + BAND_WIDTH)).round()),
                    ..PopulationPoint::new(year, predicted.round())
                }
            })
            .collect()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ConflictIntensity, EconomicSituation, FamilySupport};
    use approx::assert_relative_eq;

    fn input(base_year: i32, target_year: i32) -> PredictionInput {
        PredictionInput {
            base_year,
            target_year,
            birth_rate_change: 0.0,
            death_rate_change: 0.0,
            migration_change: 0.0,
            economic_situation: EconomicSituation::Stable,
            conflict_intensity: ConflictIntensity::Peace,
            family_support: FamilySupport::Low,
            swing_inputs: None,
        }
    }

    fn neutral_macros() -> MacroIndicators {
        MacroIndicators {
            gdp_growth: 0.0,
            conflict_index: 0.0,
            sentiment: 0.0,
        }
    }

    #[test]
    fn test_series_covers_full_horizon() {
        let projector = BaselineProjector::default();
        let series = projector.project(
            41_100_000.0,
            0.001,
            &input(2023, 2033),
            53_000_000.0,
            &neutral_macros(),
        );

        assert_eq!(series.len(), 10);
        assert_eq!(series[0].year, 2024);
        assert_eq!(series[9].year, 2033);
    }

    #[test]
    fn test_points_are_independent_of_each_other() {
        // A point for year Y is identical whether the horizon ends at Y or later,
        // which chained simulation would not satisfy
        let projector = BaselineProjector::default();
        let macros = neutral_macros();

        let short = projector.project(41_100_000.0, 0.001, &input(2023, 2026), 53_000_000.0, &macros);
        let long = projector.project(41_100_000.0, 0.001, &input(2023, 2040), 53_000_000.0, &macros);

        assert_eq!(short[2], long[2]);
    }

    #[test]
    fn test_band_is_three_percent() {
        let projector = BaselineProjector::default();
        let series = projector.project(
            41_100_000.0,
            0.001,
            &input(2023, 2024),
            53_000_000.0,
            &neutral_macros(),
        );

        let point = &series[0];
        assert!((point.lower_bound.unwrap() - point.value * 0.97).abs() <= 1.0);
        assert!((point.upper_bound.unwrap() - point.value * 1.03).abs() <= 1.0);
    }

    #[test]
    fn test_positive_sentiment_lifts_prediction() {
        let projector = BaselineProjector::default();
        let optimistic = MacroIndicators {
            sentiment: 0.5,
            ..neutral_macros()
        };

        let flat = projector.predict_year(
            41_100_000.0,
            0.0,
            &input(2023, 2030),
            53_000_000.0,
            &neutral_macros(),
            2030,
        );
        let lifted = projector.predict_year(
            41_100_000.0,
            0.0,
            &input(2023, 2030),
            53_000_000.0,
            &optimistic,
            2030,
        );

        assert!(lifted > flat);
        assert_relative_eq!(lifted / flat, 1.01, epsilon = 1e-9);
    }
}
