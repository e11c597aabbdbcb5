//! Summary statistics over plain `f64` slices

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Population standard deviation (divides by `n`, not `n - 1`)
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the standard deviation of an empty series".to_string(),
        ));
    }

    Ok(values.iter().population_std_dev())
}

/// Smallest and largest value of a non-empty slice
pub fn min_max(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the range of an empty series".to_string(),
        ));
    }

    Ok(values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
}

/// Round half away from zero to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
