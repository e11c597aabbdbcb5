//! Ordinary least squares with an intercept
//!
//! The design matrix is centered before solving, so the intercept falls out
//! of the column means. The centered system is solved through a singular
//! value decomposition, which yields the minimum-norm solution when the
//! system is rank deficient (fewer rows than columns, or collinear columns)
//! instead of failing outright.

use crate::statistics::mean;
use crate::{MathError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Singular values below this fraction of the largest one are treated as zero
const RELATIVE_RANK_TOLERANCE: f64 = 1e-10;

/// Least-squares solver for `y = X·b + c`
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSquares;

/// Coefficients and intercept produced by [`LeastSquares::fit`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeastSquaresFit {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LeastSquares {
    /// Fit coefficients for `rows` (one inner slice per observation) against `targets`
    pub fn fit<R: AsRef<[f64]>>(&self, rows: &[R], targets: &[f64]) -> Result<LeastSquaresFit> {
        if rows.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Feature rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            )));
        }

        if rows.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 observations for a regression, got {}",
                rows.len()
            )));
        }

        let width = rows[0].as_ref().len();
        if width == 0 || rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(MathError::InvalidInput(
                "Feature rows must share a non-zero width".to_string(),
            ));
        }

        let n = rows.len();
        let column_means = (0..width)
            .map(|j| {
                let column: Vec<f64> = rows.iter().map(|r| r.as_ref()[j]).collect();
                mean(&column)
            })
            .collect::<Result<Vec<f64>>>()?;
        let target_mean = mean(targets)?;

        let design = DMatrix::from_fn(n, width, |i, j| rows[i].as_ref()[j] - column_means[j]);
        let response = DVector::from_iterator(n, targets.iter().map(|y| y - target_mean));

        let svd = design.svd(true, true);
        let largest = svd
            .singular_values
            .iter()
            .fold(0.0_f64, |acc, &s| acc.max(s));
        if !largest.is_finite() || largest == 0.0 {
            return Err(MathError::CalculationError(
                "Design matrix has no spread in any column".to_string(),
            ));
        }

        let solution = svd
            .solve(&response, largest * RELATIVE_RANK_TOLERANCE)
            .map_err(|e| MathError::CalculationError(e.to_string()))?;

        let coefficients: Vec<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MathError::CalculationError(
                "Least-squares solution is not finite".to_string(),
            ));
        }

        let intercept = target_mean
            - coefficients
                .iter()
                .zip(&column_means)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Ok(LeastSquaresFit {
            coefficients,
            intercept,
        })
    }
}

impl LeastSquaresFit {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Evaluate the fitted plane at one feature row
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Row has {} features, model expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(b, x)| b * x)
                .sum::<f64>())
    }

    /// Coefficient of determination of this fit on the given observations
    pub fn r_squared<R: AsRef<[f64]>>(&self, rows: &[R], targets: &[f64]) -> Result<f64> {
        let target_mean = mean(targets)?;
        let mut residual = 0.0;
        let mut total = 0.0;

        for (row, &y) in rows.iter().zip(targets) {
            let predicted = self.predict(row.as_ref())?;
            residual += (y - predicted).powi(2);
            total += (y - target_mean).powi(2);
        }

        if total == 0.0 {
            return Ok(if residual == 0.0 { 1.0 } else { 0.0 });
        }

        Ok(1.0 - residual / total)
    }
}
