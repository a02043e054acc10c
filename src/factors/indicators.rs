//! Macro indicators driving carrying capacity and swing dynamics

use serde::{Deserialize, Serialize};

/// Externally supplied macro indicators, constant across the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroIndicators {
    /// Annual GDP growth in percent
    pub gdp_growth: f64,

    /// Conflict index in [0, 1]
    pub conflict_index: f64,

    /// Aggregate sentiment in [-1, 1]
    pub sentiment: f64,
}

impl Default for MacroIndicators {
    fn default() -> Self {
        // Current static reference values; replaced when a live provider exists
        Self {
            gdp_growth: 3.2,
            conflict_index: 0.65,
            sentiment: -0.1,
        }
    }
}

/// Replaceable source of macro indicators
///
/// The core only ever sees a snapshot fetched before computation begins.
pub trait MacroFactorsProvider {
    fn current(&self) -> MacroIndicators;
}

/// Fixed macro indicators, the only provider shipped today
#[derive(Debug, Clone, Default)]
pub struct StaticMacroFactors {
    indicators: MacroIndicators,
}

impl StaticMacroFactors {
    pub fn new(indicators: MacroIndicators) -> Self {
        Self { indicators }
    }
}

impl MacroFactorsProvider for StaticMacroFactors {
    fn current(&self) -> MacroIndicators {
        self.indicators
    }
}
