//! Swing dials, shock events and policy response templates
//!
//! Swing inputs are the scenario's dynamic controls: geopolitical index,
//! economic cycle phase, international support, stochastic volatility and
//! discrete shock events. Policy templates mitigate (or at low support,
//! amplify) shock severity and recovery length before the engine sees them.

use serde::{Deserialize, Serialize};

use super::input::ConflictIntensity;
use crate::error::{ForecastError, Result};

/// A one-time severity impulse with an exponential recovery curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockEvent {
    /// Calendar year the shock hits
    pub year: i32,

    /// Severity in [-1, 1]; negative shocks depress population
    pub severity: f64,

    /// Years until the recovery curve saturates (>= 1)
    pub recovery_years: u32,

    /// Region codes hit by the shock; None means country-wide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions_affected: Option<Vec<String>>,
}

impl ShockEvent {
    /// A shock is active for year `y` iff `0 <= y - year <= recovery_years`
    pub fn is_active(&self, year: i32) -> bool {
        let distance = year - self.year;
        distance >= 0 && distance <= self.recovery_years as i32
    }

    /// Exponential recovery curve: 0 at impact, saturating toward 1
    pub fn recovery_curve(&self, year: i32) -> f64 {
        let distance = (year - self.year) as f64;
        let phase = distance / (self.recovery_years.max(1) as f64);
        1.0 - (-5.0 * phase).exp()
    }

    fn validate(&self) -> Result<()> {
        if !(1900..=2300).contains(&self.year) {
            return Err(ForecastError::Validation(format!(
                "shock year {} outside [1900, 2300]",
                self.year
            )));
        }
        if !self.severity.is_finite() || !(-1.0..=1.0).contains(&self.severity) {
            return Err(ForecastError::Validation(format!(
                "shock severity {} outside [-1, 1]",
                self.severity
            )));
        }
        if !(1..=30).contains(&self.recovery_years) {
            return Err(ForecastError::Validation(format!(
                "shock recoveryYears {} outside [1, 30]",
                self.recovery_years
            )));
        }
        Ok(())
    }
}

/// Raw swing dials as supplied by the request
///
/// `geopolitical_index` is optional: when absent it is derived from the
/// scenario's conflict intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingInputs {
    /// Geopolitical index in [-1, 1]; None derives from conflict intensity
    #[serde(default)]
    pub geopolitical_index: Option<f64>,

    /// Position within the economic cycle, in [0, 1)
    #[serde(default)]
    pub economic_cycle_position: f64,

    /// International support level in [0, 1]
    #[serde(default = "default_international_support")]
    pub international_support: f64,

    /// Stochastic volatility in [0, 1]
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Discrete shock events
    #[serde(default)]
    pub shock_events: Vec<ShockEvent>,
}

fn default_international_support() -> f64 {
    0.5
}

fn default_volatility() -> f64 {
    0.2
}

impl Default for SwingInputs {
    fn default() -> Self {
        Self {
            geopolitical_index: None,
            economic_cycle_position: 0.0,
            international_support: default_international_support(),
            volatility: default_volatility(),
            shock_events: Vec::new(),
        }
    }
}

impl SwingInputs {
    /// Validate all dial domains and every shock event
    pub fn validate(&self) -> Result<()> {
        if let Some(geo) = self.geopolitical_index {
            if !geo.is_finite() || !(-1.0..=1.0).contains(&geo) {
                return Err(ForecastError::Validation(format!(
                    "geopoliticalIndex {geo} outside [-1, 1]"
                )));
            }
        }
        for (name, value) in [
            ("economicCyclePosition", self.economic_cycle_position),
            ("internationalSupport", self.international_support),
            ("volatility", self.volatility),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::Validation(format!(
                    "{name} {value} outside [0, 1]"
                )));
            }
        }
        for shock in &self.shock_events {
            shock.validate()?;
        }
        Ok(())
    }

    /// Fill the geopolitical default and produce the concrete dials
    pub fn resolve(&self, conflict: ConflictIntensity) -> ResolvedSwing {
        ResolvedSwing {
            geopolitical_index: self
                .geopolitical_index
                .unwrap_or_else(|| conflict.default_geopolitical_index()),
            economic_cycle_position: self.economic_cycle_position,
            international_support: self.international_support,
            volatility: self.volatility,
            shock_events: self.shock_events.clone(),
        }
    }
}

/// Concrete swing dials consumed by the dynamics engine
///
/// Each engine invocation receives its own copy so no invocation can observe
/// state written by another (primary run vs. sensitivity variants).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSwing {
    pub geopolitical_index: f64,
    pub economic_cycle_position: f64,
    pub international_support: f64,
    pub volatility: f64,
    pub shock_events: Vec<ShockEvent>,
}

impl ResolvedSwing {
    /// Shocks with the policy template's mitigation applied
    ///
    /// Recovery never rounds below one year.
    pub fn effective_shocks(&self, template: &PolicyTemplate) -> Vec<ShockEvent> {
        self.shock_events
            .iter()
            .map(|shock| ShockEvent {
                year: shock.year,
                severity: shock.severity * template.severity_multiplier,
                recovery_years: ((shock.recovery_years as f64 * template.recovery_multiplier)
                    .round() as u32)
                    .max(1),
                regions_affected: shock.regions_affected.clone(),
            })
            .collect()
    }
}

/// A support-level-dependent shock response template
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTemplate {
    /// Display name of the response
    pub name: &'static str,

    /// Minimum international support required for this template
    pub min_support: f64,

    /// Multiplier applied to shock severity
    pub severity_multiplier: f64,

    /// Multiplier applied to shock recovery length
    pub recovery_multiplier: f64,
}

/// Response templates ordered highest-support-first
///
/// The last entry is the catch-all low-support response, which amplifies
/// shocks rather than mitigating them.
pub const POLICY_TEMPLATES: [PolicyTemplate; 3] = [
    PolicyTemplate {
        name: "Гуманітарний прорив",
        min_support: 0.7,
        severity_multiplier: 0.82,
        recovery_multiplier: 0.8,
    },
    PolicyTemplate {
        name: "Стабілізаційна місія",
        min_support: 0.4,
        severity_multiplier: 0.92,
        recovery_multiplier: 0.9,
    },
    PolicyTemplate {
        name: "Обмежена реакція",
        min_support: 0.0,
        severity_multiplier: 1.05,
        recovery_multiplier: 1.1,
    },
];

/// Select the template with the highest `min_support` not exceeding `support`
pub fn select_policy_template(support: f64) -> &'static PolicyTemplate {
    POLICY_TEMPLATES
        .iter()
        .find(|t| t.min_support <= support)
        .unwrap_or(&POLICY_TEMPLATES[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shock_active_window() {
        let shock = ShockEvent {
            year: 2024,
            severity: -0.9,
            recovery_years: 5,
            regions_affected: None,
        };

        assert!(!shock.is_active(2023));
        assert!(shock.is_active(2024));
        assert!(shock.is_active(2029));
        assert!(!shock.is_active(2030));
    }

    #[test]
    fn test_recovery_curve_zero_at_impact() {
        let shock = ShockEvent {
            year: 2024,
            severity: -0.9,
            recovery_years: 5,
            regions_affected: None,
        };

        assert_eq!(shock.recovery_curve(2024), 0.0);
        assert!(shock.recovery_curve(2025) > 0.0);
        assert_relative_eq!(shock.recovery_curve(2029), 1.0 - (-5.0_f64).exp());
    }

    #[test]
    fn test_template_selection_by_support_level() {
        assert_eq!(select_policy_template(0.9).name, "Гуманітарний прорив");
        assert_eq!(select_policy_template(0.7).name, "Гуманітарний прорив");
        assert_eq!(select_policy_template(0.5).name, "Стабілізаційна місія");
        assert_eq!(select_policy_template(0.1).name, "Обмежена реакція");
    }

    #[test]
    fn test_effective_shocks_keep_min_one_year_recovery() {
        let swing = ResolvedSwing {
            geopolitical_index: 0.0,
            economic_cycle_position: 0.0,
            international_support: 0.9,
            volatility: 0.0,
            shock_events: vec![ShockEvent {
                year: 2024,
                severity: -0.5,
                recovery_years: 1,
                regions_affected: None,
            }],
        };

        let template = select_policy_template(0.9);
        let effective = swing.effective_shocks(template);
        assert_eq!(effective[0].recovery_years, 1);
        assert_relative_eq!(effective[0].severity, -0.5 * 0.82);
    }

    #[test]
    fn test_shock_validation_bounds() {
        let mut swing = SwingInputs::default();
        swing.shock_events.push(ShockEvent {
            year: 2024,
            severity: -1.5,
            recovery_years: 5,
            regions_affected: None,
        });
        assert!(swing.validate().is_err());

        swing.shock_events[0].severity = -0.5;
        swing.shock_events[0].recovery_years = 0;
        assert!(swing.validate().is_err());

        swing.shock_events[0].recovery_years = 31;
        assert!(swing.validate().is_err());

        swing.shock_events[0].recovery_years = 5;
        assert!(swing.validate().is_ok());
    }
}
