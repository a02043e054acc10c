//! Population Forecast - scenario-driven population trajectory engine
//!
//! This library provides:
//! - Growth-rate estimation from noisy historical series
//! - Hybrid exponential-logistic projection with a dynamic carrying capacity
//! - A chained dynamics engine with swing factors, shocks, policy response
//!   and regional feedback
//! - Regional distribution with gender split
//! - Local sensitivity analysis over the scenario dials

pub mod error;
pub mod factors;
pub mod forecast;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use factors::{Factors, MacroIndicators};
pub use forecast::{ForecastResponse, ForecastRunner};
pub use projection::{DynamicsEngine, GrowthRateEstimator, PopulationPoint, SensitivityResult};
pub use scenario::{PredictionInput, ShockEvent, SwingInputs};
