//! Projection output structures

use serde::{Deserialize, Serialize};

/// Additive decomposition of one year's adjusted growth rate
///
/// The components sum to the adjusted rate before shock overlay and
/// support softening are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingComponents {
    pub base: f64,
    pub eco_cycle: f64,
    pub geopolitical: f64,
    pub support: f64,
    pub sentiment: f64,
    pub volatility: f64,
    pub regional_feedback: f64,
}

impl SwingComponents {
    /// The adjusted growth rate this breakdown decomposes
    pub fn total(&self) -> f64 {
        self.base
            + self.eco_cycle
            + self.geopolitical
            + self.support
            + self.sentiment
            + self.volatility
            + self.regional_feedback
    }
}

/// A single yearly point of a projected series
///
/// Immutable once emitted; optional fields are only present on points
/// produced by the dynamics engine or the merged chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationPoint {
    pub year: i32,
    pub value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shock_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_phase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_components: Option<SwingComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_modifier: Option<f64>,
}

impl PopulationPoint {
    /// A bare point carrying only year and value
    pub fn new(year: i32, value: f64) -> Self {
        Self {
            year,
            value,
            lower_bound: None,
            upper_bound: None,
            baseline_value: None,
            swing_value: None,
            growth_rate: None,
            shock_impact: None,
            cycle_phase: None,
            swing_components: None,
            policy_modifier: None,
        }
    }
}

/// Aggregated shock footprint for one year of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockImpactRecord {
    pub year: i32,
    /// Population overlay in percent, rounded to 2 decimals
    pub percent: f64,
    /// Sum of severities of the shocks active that year
    pub severity: f64,
}

/// Run-level metadata aggregated from the yearly fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingMetadata {
    /// Spread between the largest and smallest adjusted growth rate
    pub volatility_range: f64,

    /// Mean absolute deviation of the adjusted rate from the base rate
    pub average_cycle_amplitude: f64,

    /// Per-component averages over all projected years
    pub component_averages: SwingComponents,

    /// Years where the shock overlay was nonzero
    pub shock_impacts: Vec<ShockImpactRecord>,

    /// Mean migration drift fed back from regional shock weighting
    pub average_regional_feedback: f64,

    /// Policy response templates applied to the scenario's shocks
    pub applied_policies: Vec<String>,
}

/// Output of one dynamics-engine invocation; owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicProjection {
    pub series: Vec<PopulationPoint>,
    pub metadata: SwingMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_components_total_is_additive() {
        let components = SwingComponents {
            base: 0.01,
            eco_cycle: 0.002,
            geopolitical: -0.001,
            support: 0.0005,
            sentiment: -0.0003,
            volatility: 0.0001,
            regional_feedback: -0.002,
        };
        assert_relative_eq!(components.total(), 0.0093, epsilon = 1e-12);
    }

    #[test]
    fn test_bare_point_serializes_without_optionals() {
        let point = PopulationPoint::new(2030, 40_000_000.0);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"year":2030,"value":40000000.0}"#);
    }
}
