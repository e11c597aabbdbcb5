//! # Prop Math
//!
//! Numerical building blocks for property price models.
//! This crate provides summary statistics, z-score feature scaling and an
//! ordinary-least-squares solver for small dense design matrices.

use thiserror::Error;

pub mod regression;
pub mod scaling;
pub mod statistics;

pub use regression::{LeastSquares, LeastSquaresFit};
pub use scaling::StandardScaler;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;
