//! Prediction input and the categorical scenario fields
//!
//! Categorical fields map to numeric effect values through closed enums with
//! exhaustive match dispatch, never string parsing at the point of use.

use serde::{Deserialize, Serialize};

use super::swing::{ResolvedSwing, SwingInputs};
use crate::error::{ForecastError, Result};

/// Economic regime assumed for the projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EconomicSituation {
    Weak,
    Stable,
    Growing,
}

impl EconomicSituation {
    /// Numeric effect folded into the static effective rate
    pub fn effect(&self) -> f64 {
        match self {
            EconomicSituation::Weak => -1.0,
            EconomicSituation::Stable => 0.0,
            EconomicSituation::Growing => 1.0,
        }
    }
}

/// Assumed geopolitical conflict level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictIntensity {
    Peace,
    Tension,
    War,
}

impl ConflictIntensity {
    /// Numeric effect folded into the static effective rate
    pub fn effect(&self) -> f64 {
        match self {
            ConflictIntensity::Peace => -0.2,
            ConflictIntensity::Tension => 0.5,
            ConflictIntensity::War => 1.0,
        }
    }

    /// Default geopolitical index used when the scenario does not override it
    pub fn default_geopolitical_index(&self) -> f64 {
        match self {
            ConflictIntensity::Peace => 0.5,
            ConflictIntensity::Tension => -0.3,
            ConflictIntensity::War => -0.9,
        }
    }
}

/// Level of family-support policy in the scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FamilySupport {
    Low,
    Medium,
    Strong,
}

impl FamilySupport {
    /// Numeric effect folded into the static effective rate
    pub fn effect(&self) -> f64 {
        match self {
            FamilySupport::Low => 0.0,
            FamilySupport::Medium => 0.4,
            FamilySupport::Strong => 1.0,
        }
    }
}

/// A validated forecast request: horizon, rate deltas, categorical regime and
/// optional swing dials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Last historical year the projection starts from
    pub base_year: i32,

    /// Year the forecast runs to (exclusive of nothing; the final point is this year)
    pub target_year: i32,

    /// Birth rate delta in percent
    pub birth_rate_change: f64,

    /// Death rate delta in percent
    pub death_rate_change: f64,

    /// Net migration delta in percent
    pub migration_change: f64,

    /// Assumed economic regime
    pub economic_situation: EconomicSituation,

    /// Assumed conflict level
    pub conflict_intensity: ConflictIntensity,

    /// Assumed family-support policy level
    pub family_support: FamilySupport,

    /// Optional swing dials; defaults derive from the categorical fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_inputs: Option<SwingInputs>,
}

impl PredictionInput {
    /// Validate all numeric bounds; rejected inputs never reach the engines
    pub fn validate(&self) -> Result<()> {
        if !(1900..=2100).contains(&self.base_year) {
            return Err(ForecastError::Validation(format!(
                "baseYear {} outside [1900, 2100]",
                self.base_year
            )));
        }
        if !(1901..=2200).contains(&self.target_year) {
            return Err(ForecastError::Validation(format!(
                "targetYear {} outside [1901, 2200]",
                self.target_year
            )));
        }
        if self.target_year <= self.base_year {
            return Err(ForecastError::Validation(format!(
                "targetYear {} must be greater than baseYear {}",
                self.target_year, self.base_year
            )));
        }

        for (name, value) in [
            ("birthRateChange", self.birth_rate_change),
            ("deathRateChange", self.death_rate_change),
            ("migrationChange", self.migration_change),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::Validation(format!("{name} is not finite")));
            }
        }

        if let Some(swing) = &self.swing_inputs {
            swing.validate()?;
        }

        Ok(())
    }

    /// Resolve the swing dials, filling defaults from the categorical fields
    pub fn resolved_swing(&self) -> ResolvedSwing {
        match &self.swing_inputs {
            Some(swing) => swing.resolve(self.conflict_intensity),
            None => SwingInputs::default().resolve(self.conflict_intensity),
        }
    }

    /// Copy of this input with the horizon truncated to `year`
    ///
    /// The baseline projector treats every year as its own single-step target.
    pub fn truncated_to(&self, year: i32) -> Self {
        Self {
            target_year: year,
            ..self.clone()
        }
    }
}
