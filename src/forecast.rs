//! Forecast runner: the end-to-end orchestration of the core
//!
//! Pre-loads factor data once, then runs any number of forecasts without
//! re-reading files. One run wires the pipeline together:
//! history -> growth estimate -> {carrying capacity, effective rate} ->
//! {baseline projector, dynamics engine} -> regional split -> sensitivity.

use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::factors::{base_population, fallback_series, Factors, HistoricalDataSource};
use crate::projection::{
    carrying_capacity, effective_rate, BaselineProjector, DynamicsConfig, DynamicsEngine,
    GrowthRateEstimator, PopulationPoint, RateWeights, RegionForecast, RegionalDistributor,
    SensitivityAnalyzer, SensitivityResult, SwingMetadata, BAND_WIDTH,
};
use crate::scenario::{PredictionInput, ResolvedSwing};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Complete forecast output, transport-agnostic
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    /// Static target-year point prediction
    pub predicted_population: f64,

    /// Baseline annual growth rate estimated from history
    pub growth_rate: f64,

    /// Scenario-adjusted static rate used by the point prediction
    pub adjusted_rate: f64,

    /// Logistic ceiling applied throughout the horizon
    pub carrying_capacity: f64,

    pub lower_bound: f64,
    pub upper_bound: f64,

    /// Merged yearly chart series (static band + dynamic trajectory)
    pub data: Vec<PopulationPoint>,

    /// Final-year regional breakdown of the point prediction
    pub regions: Vec<RegionForecast>,

    /// The resolved swing dials the simulation actually used
    pub swing_inputs: ResolvedSwing,

    pub swing_metadata: SwingMetadata,

    pub sensitivity: SensitivityResult,
}

/// Pre-loaded forecast runner
///
/// # Example
/// ```ignore
/// let runner = ForecastRunner::new();
/// let response = runner.run(&input, 42)?;
/// ```
#[derive(Debug, Clone)]
pub struct ForecastRunner {
    factors: Factors,
    estimator: GrowthRateEstimator,
    projector: BaselineProjector,
}

impl ForecastRunner {
    /// Runner with the built-in reference factor data
    pub fn new() -> Self {
        Self::with_factors(Factors::default_reference())
    }

    /// Runner with pre-built factor data
    pub fn with_factors(factors: Factors) -> Self {
        Self {
            factors,
            estimator: GrowthRateEstimator::default(),
            projector: BaselineProjector::default(),
        }
    }

    /// Runner that fetches history from an external source
    ///
    /// A failing or empty source degrades to the frozen fallback series; the
    /// degradation is logged, never hidden, and the forecast still runs.
    pub fn from_history_source(source: &dyn HistoricalDataSource) -> Self {
        let mut factors = Factors::default_reference();
        factors.history = match source.fetch() {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                log::warn!("historical source returned no records, using fallback series");
                fallback_series()
            }
            Err(err) => {
                log::warn!("historical source failed ({err}), using fallback series");
                fallback_series()
            }
        };
        Self::with_factors(factors)
    }

    /// Access the loaded factor data
    pub fn factors(&self) -> &Factors {
        &self.factors
    }

    /// Run one forecast; `noise_seed` controls the volatility noise stream
    pub fn run(&self, input: &PredictionInput, noise_seed: u64) -> Result<ForecastResponse> {
        input.validate()?;

        let base_pop = base_population(&self.factors.history, input.base_year).ok_or_else(|| {
            ForecastError::Internal("historical series is empty after degradation".to_string())
        })?;

        // Residual non-finiteness from a pathological series is neutralized here
        let raw_rate = self.estimator.estimate(&self.factors.history, input.base_year);
        let growth_rate = if raw_rate.is_finite() { raw_rate } else { 0.0 };

        let capacity = carrying_capacity(base_pop, &self.factors.macros);
        let adjusted_rate = effective_rate(growth_rate, input, &RateWeights::default());

        let predicted = self.projector.predict_year(
            base_pop,
            growth_rate,
            input,
            capacity,
            &self.factors.macros,
            input.target_year,
        );
        if !predicted.is_finite() {
            return Err(ForecastError::Computation(format!(
                "static prediction for {} is not finite",
                input.target_year
            )));
        }
        let predicted_population = predicted.round();
        let lower_bound = (predicted * (1.0 - BAND_WIDTH)).round();
        let upper_bound = (predicted * (1.0 + BAND_WIDTH)).round();

        let baseline_series = self.projector.project(
            base_pop,
            growth_rate,
            input,
            capacity,
            &self.factors.macros,
        );

        let swing = input.resolved_swing();
        let config = DynamicsConfig {
            base_population: base_pop,
            base_rate: growth_rate,
            carrying_capacity: capacity,
            start_year: input.base_year,
            end_year: input.target_year,
        };

        let engine = DynamicsEngine::new(
            config.clone(),
            swing.clone(),
            self.factors.macros,
            &self.factors.regions,
        );
        let mut rng = StdRng::seed_from_u64(noise_seed);
        let dynamic = engine.run(&mut rng);

        let data = merge_series(baseline_series, dynamic.series);

        let distributor =
            RegionalDistributor::new(&self.factors.regions, &self.factors.gender_ratios);
        let regions = distributor.distribute(
            predicted_population,
            input.target_year,
            Some((lower_bound, upper_bound)),
        );

        let analyzer = SensitivityAnalyzer::new(config, self.factors.macros, &self.factors.regions);
        let sensitivity = analyzer.analyze(&swing, noise_seed);

        Ok(ForecastResponse {
            predicted_population,
            growth_rate,
            adjusted_rate,
            carrying_capacity: capacity,
            lower_bound,
            upper_bound,
            data,
            regions,
            swing_inputs: swing,
            swing_metadata: dynamic.metadata,
            sensitivity,
        })
    }
}

impl Default for ForecastRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the static band into the dynamic trajectory, year by year
///
/// The static point supplies `value` and the uncertainty band; the dynamic
/// point supplies the trajectory fields. Both series cover the same horizon.
fn merge_series(
    baseline: Vec<PopulationPoint>,
    dynamic: Vec<PopulationPoint>,
) -> Vec<PopulationPoint> {
    baseline
        .into_iter()
        .zip(dynamic)
        .map(|(banded, traced)| PopulationPoint {
            value: banded.value,
            lower_bound: banded.lower_bound,
            upper_bound: banded.upper_bound,
            ..traced
        })
        .collect()
}
