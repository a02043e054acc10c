//! Error taxonomy for the forecast core
//!
//! Validation fails fast before any computation. Historical-data failures are
//! recovered inside the runner (fallback series) and therefore rarely escape.
//! Numeric failures abort the request and are reported distinctly.

use thiserror::Error;

/// Errors produced by the forecast core
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed or out-of-range prediction input; rejected before computation
    #[error("invalid prediction input: {0}")]
    Validation(String),

    /// Historical data source failed or returned nothing
    #[error("historical data unavailable: {0}")]
    DataUnavailable(String),

    /// A numeric transform produced a non-finite result
    #[error("computation produced a non-finite result: {0}")]
    Computation(String),

    /// Any other unexpected failure, reported generically
    #[error("internal forecast error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ForecastError>;
