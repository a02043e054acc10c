//! Projection engines and their output types

mod baseline;
mod capacity;
mod dynamics;
mod effective;
mod estimator;
mod regional;
mod sensitivity;
mod series;

pub use baseline::{BaselineProjector, BAND_WIDTH};
pub use capacity::carrying_capacity;
pub use dynamics::{logistic_step, DynamicsConfig, DynamicsEngine, NoiseSource};
pub use effective::{effective_rate, RateWeights, RATE_CEILING, RATE_FLOOR};
pub use estimator::GrowthRateEstimator;
pub use regional::{RegionForecast, RegionalDistributor};
pub use sensitivity::{SensitivityAnalyzer, SensitivityPoint, SensitivityResult};
pub use series::{
    DynamicProjection, PopulationPoint, ShockImpactRecord, SwingComponents, SwingMetadata,
};
