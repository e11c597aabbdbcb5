//! Error types for the prop_forecast crate

use prop_math::MathError;
use thiserror::Error;

/// Custom error types for the prop_forecast crate
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required columns are missing or the table is malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Too few rows, a constant feature or non-finite values
    #[error("Degenerate dataset: {0}")]
    DegenerateDataset(String),

    /// Forecast or simulation requested before any training
    #[error("Model is not trained")]
    NotTrained,

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numerical routines
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error while loading configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while serializing results
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Reject NaN and infinite inputs with a message naming the field
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
