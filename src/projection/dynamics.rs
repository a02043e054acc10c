//! Chained year-by-year population dynamics
//!
//! The engine carries two populations across years: the scenario-affected
//! trajectory and a pure-logistic reference. Each year it rebuilds the growth
//! rate from swing components, feeds active shocks back into migration drift,
//! softens negative growth by international support, steps the logistic model
//! and finally overlays the direct shock impact on the population level.
//!
//! Each invocation owns its inputs; nothing is shared across runs, so the
//! primary projection and the sensitivity variants can never observe each
//! other's state.

use rand::Rng;

use super::series::{
    DynamicProjection, PopulationPoint, ShockImpactRecord, SwingComponents, SwingMetadata,
};
use crate::factors::{MacroIndicators, RegionCoefficientTable};
use crate::scenario::{select_policy_template, ResolvedSwing, ShockEvent};

/// Length of the economic cycle used for phase bookkeeping
const CYCLE_LENGTH: f64 = 9.5;

/// Growth-rate drift per unit of weighted shock intensity
const MIGRATION_DRIFT_FACTOR: f64 = 0.0035;

/// International-support lift per unit of positive weighted intensity
const SUPPORT_LIFT_FACTOR: f64 = 0.002;

/// Direct population overlay per unit of shock intensity
const SHOCK_OVERLAY_FACTOR: f64 = 0.04;

/// Injectable source of uniform noise in [0, 1)
///
/// The volatility component is the engine's only nondeterminism; passing the
/// generator explicitly keeps runs reproducible and test-controllable.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> NoiseSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random()
    }
}

/// One discrete logistic update, floored at zero
pub fn logistic_step(population: f64, rate: f64, carrying_capacity: f64) -> f64 {
    let ceiling = carrying_capacity.max(population * 1.01);
    (population + rate * population * (1.0 - population / ceiling)).max(0.0)
}

/// Fixed parameters of one simulation run
#[derive(Debug, Clone)]
pub struct DynamicsConfig {
    pub base_population: f64,
    pub base_rate: f64,
    pub carrying_capacity: f64,
    pub start_year: i32,
    pub end_year: i32,
}

/// The chained scenario simulator
pub struct DynamicsEngine<'a> {
    config: DynamicsConfig,
    swing: ResolvedSwing,
    macros: MacroIndicators,
    regions: &'a RegionCoefficientTable,
}

/// Immutable outcome of one simulated year, produced by the pure step function
struct YearOutcome {
    year: i32,
    population: f64,
    adjusted_growth: f64,
    components: SwingComponents,
    shock_modifier: f64,
    active_severity: f64,
    cycle_phase: f64,
    policy_modifier: f64,
}

impl<'a> DynamicsEngine<'a> {
    pub fn new(
        config: DynamicsConfig,
        swing: ResolvedSwing,
        macros: MacroIndicators,
        regions: &'a RegionCoefficientTable,
    ) -> Self {
        Self {
            config,
            swing,
            macros,
            regions,
        }
    }

    /// Run the simulation from `start_year + 1` through `end_year`
    pub fn run(&self, noise: &mut dyn NoiseSource) -> DynamicProjection {
        let template = select_policy_template(self.swing.international_support);
        let effective_shocks = self.swing.effective_shocks(template);
        log::debug!(
            "dynamics run {}..={} policy template {}",
            self.config.start_year + 1,
            self.config.end_year,
            template.name
        );

        let mut current = self.config.base_population;
        let mut baseline = self.config.base_population;

        let mut series = Vec::new();
        let mut outcomes = Vec::new();

        for year in self.config.start_year + 1..=self.config.end_year {
            baseline = logistic_step(baseline, self.config.base_rate, self.config.carrying_capacity);

            let outcome = self.step_year(current, year, &effective_shocks, noise);
            current = outcome.population;

            series.push(PopulationPoint {
                baseline_value: Some(baseline.round()),
                swing_value: Some(outcome.population.round()),
                growth_rate: Some(outcome.adjusted_growth),
                shock_impact: Some(outcome.shock_modifier),
                cycle_phase: Some(outcome.cycle_phase),
                swing_components: Some(outcome.components),
                policy_modifier: Some(outcome.policy_modifier),
                ..PopulationPoint::new(year, outcome.population.round())
            });
            outcomes.push(outcome);
        }

        DynamicProjection {
            metadata: self.build_metadata(&outcomes, template.name, &effective_shocks),
            series,
        }
    }

    /// Simulate a single year; pure except for the injected noise draw
    fn step_year(
        &self,
        current: f64,
        year: i32,
        effective_shocks: &[ShockEvent],
        noise: &mut dyn NoiseSource,
    ) -> YearOutcome {
        let offset = (year - self.config.start_year) as f64;
        let geo = self.swing.geopolitical_index;

        // Economic cycle oscillation; sentiment stretches or compresses the period
        let cycle_period = (CYCLE_LENGTH - self.macros.sentiment * 2.0).clamp(6.5, 11.5);
        let amplitude = 0.01 + (self.macros.gdp_growth / 5.0).clamp(-2.0, 2.0).abs() * 0.004;
        let eco_cycle = (std::f64::consts::TAU
            * (offset + self.swing.economic_cycle_position * 100.0)
            / cycle_period)
            .sin()
            * amplitude
            * (1.0 + geo * 0.4);

        // Conflict attenuates how much the geopolitical index can move the rate
        let geopolitical =
            geo * 0.008 * (1.0 - self.macros.conflict_index * 0.6).clamp(0.25, 1.0);

        let support = self.swing.international_support
            * (0.004 + self.macros.sentiment.max(0.0) * 0.003);

        let sentiment = self.macros.sentiment * 0.003;

        let volatility = (noise.next_unit() - 0.5)
            * 0.01
            * self.swing.volatility
            * (1.0 + self.macros.conflict_index * 0.5);

        // Regional feedback: active shocks drag migration and lift support
        let mut migration_drift = 0.0;
        let mut support_lift = 0.0;
        for shock in effective_shocks.iter().filter(|s| s.is_active(year)) {
            let intensity = shock.severity * shock.recovery_curve(year);
            let weight = self.shock_weight(shock);
            migration_drift += intensity * weight * MIGRATION_DRIFT_FACTOR;
            if intensity > 0.0 {
                support_lift += intensity * weight * SUPPORT_LIFT_FACTOR;
            }
        }

        let components = SwingComponents {
            base: self.config.base_rate,
            eco_cycle,
            geopolitical,
            support,
            sentiment,
            volatility,
            regional_feedback: migration_drift,
        };
        let mut adjusted_growth = components.total();

        // Support softening: dampens decline, never amplifies growth
        let support_level = (self.swing.international_support + support_lift).clamp(0.0, 1.0);
        if adjusted_growth < 0.0 {
            adjusted_growth *= 1.0 - support_level * 0.5;
        }

        let stepped = logistic_step(current, adjusted_growth, self.config.carrying_capacity);

        // Direct population overlay, separate from the growth-rate feedback
        let mut shock_modifier = 0.0;
        let mut active_severity = 0.0;
        for shock in effective_shocks.iter().filter(|s| s.is_active(year)) {
            shock_modifier += shock.severity * shock.recovery_curve(year) * SHOCK_OVERLAY_FACTOR;
            active_severity += shock.severity;
        }
        let population = stepped * (1.0 + shock_modifier);

        let cycle_phase = (offset.rem_euclid(CYCLE_LENGTH) / CYCLE_LENGTH
            + self.swing.economic_cycle_position)
            .rem_euclid(1.0);

        YearOutcome {
            year,
            population,
            adjusted_growth,
            components,
            shock_modifier,
            active_severity,
            cycle_phase,
            policy_modifier: support_level - self.swing.international_support,
        }
    }

    /// Regional weight of a shock within the country total
    fn shock_weight(&self, shock: &ShockEvent) -> f64 {
        match &shock.regions_affected {
            None => 1.0,
            Some(codes) => {
                let weight = self.regions.weight_of(codes);
                if weight > 0.0 {
                    weight
                } else {
                    // Unknown or empty region list still carries some footprint
                    0.2
                }
            }
        }
    }

    fn build_metadata(
        &self,
        outcomes: &[YearOutcome],
        template_name: &str,
        effective_shocks: &[ShockEvent],
    ) -> SwingMetadata {
        let count = outcomes.len();

        let volatility_range = if count == 0 {
            0.0
        } else {
            let max = outcomes
                .iter()
                .map(|o| o.adjusted_growth)
                .fold(f64::NEG_INFINITY, f64::max);
            let min = outcomes
                .iter()
                .map(|o| o.adjusted_growth)
                .fold(f64::INFINITY, f64::min);
            max - min
        };

        let average_cycle_amplitude = mean(
            outcomes
                .iter()
                .map(|o| (o.adjusted_growth - self.config.base_rate).abs()),
            count,
        );

        let component_averages = SwingComponents {
            base: mean(outcomes.iter().map(|o| o.components.base), count),
            eco_cycle: mean(outcomes.iter().map(|o| o.components.eco_cycle), count),
            geopolitical: mean(outcomes.iter().map(|o| o.components.geopolitical), count),
            support: mean(outcomes.iter().map(|o| o.components.support), count),
            sentiment: mean(outcomes.iter().map(|o| o.components.sentiment), count),
            volatility: mean(outcomes.iter().map(|o| o.components.volatility), count),
            regional_feedback: mean(
                outcomes.iter().map(|o| o.components.regional_feedback),
                count,
            ),
        };

        let shock_impacts = outcomes
            .iter()
            .filter(|o| o.shock_modifier != 0.0)
            .map(|o| ShockImpactRecord {
                year: o.year,
                percent: (o.shock_modifier * 10_000.0).round() / 100.0,
                severity: o.active_severity,
            })
            .collect();

        let applied_policies = if effective_shocks.is_empty() {
            Vec::new()
        } else {
            vec![template_name.to_string()]
        };

        SwingMetadata {
            volatility_range,
            average_cycle_amplitude,
            component_averages,
            shock_impacts,
            average_regional_feedback: component_averages.regional_feedback,
            applied_policies,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}
