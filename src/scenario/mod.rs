//! Scenario definition: prediction inputs, swing dials, and shock events

mod input;
mod swing;

pub use input::{ConflictIntensity, EconomicSituation, FamilySupport, PredictionInput};
pub use swing::{
    select_policy_template, PolicyTemplate, ResolvedSwing, ShockEvent, SwingInputs,
    POLICY_TEMPLATES,
};
