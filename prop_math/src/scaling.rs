//! Z-score feature scaling

use crate::statistics::{mean, population_std_dev};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Spreads below this are treated as a constant column
const MIN_STD_DEV: f64 = 1e-12;

/// Per-column standardization parameters learned from a feature matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl StandardScaler {
    /// Learn column means and population standard deviations from `rows`.
    ///
    /// Every row must have the same width. A column without spread cannot be
    /// standardized and is reported as `InvalidInput` naming its index.
    pub fn fit<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let width = match rows.first() {
            Some(row) => row.as_ref().len(),
            None => {
                return Err(MathError::InsufficientData(
                    "Cannot fit a scaler on an empty matrix".to_string(),
                ))
            }
        };

        if width == 0 {
            return Err(MathError::InvalidInput(
                "Feature rows must have at least one column".to_string(),
            ));
        }

        if let Some(bad) = rows.iter().position(|r| r.as_ref().len() != width) {
            return Err(MathError::InvalidInput(format!(
                "Row {} has {} columns, expected {}",
                bad,
                rows[bad].as_ref().len(),
                width
            )));
        }

        let mut means = Vec::with_capacity(width);
        let mut std_devs = Vec::with_capacity(width);

        for column in 0..width {
            let values: Vec<f64> = rows.iter().map(|r| r.as_ref()[column]).collect();
            let std_dev = population_std_dev(&values)?;
            if !std_dev.is_finite() || std_dev < MIN_STD_DEV {
                return Err(MathError::InvalidInput(format!(
                    "Column {} has zero variance",
                    column
                )));
            }

            means.push(mean(&values)?);
            std_devs.push(std_dev);
        }

        Ok(Self { means, std_devs })
    }

    /// Number of columns the scaler was fitted on
    pub fn width(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Standardize one row with the stored parameters
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.width() {
            return Err(MathError::InvalidInput(format!(
                "Row has {} columns, scaler was fitted on {}",
                row.len(),
                self.width()
            )));
        }

        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    /// Standardize every row of a matrix
    pub fn transform_all<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|r| self.transform(r.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_and_transform() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 30.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        assert_eq!(scaler.means(), &[2.0, 20.0]);
        assert_eq!(scaler.std_devs(), &[1.0, 10.0]);

        let scaled = scaler.transform_all(&rows).unwrap();
        assert_relative_eq!(scaled[0][0], -1.0);
        assert_relative_eq!(scaled[1][1], 1.0);
    }

    #[test]
    fn test_constant_column_is_rejected() {
        let rows = vec![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]];
        let err = StandardScaler::fit(&rows).unwrap_err();
        assert_eq!(
            err,
            MathError::InvalidInput("Column 1 has zero variance".to_string())
        );
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(StandardScaler::fit(&rows).is_err());
    }

    #[test]
    fn test_transform_width_mismatch() {
        let scaler = StandardScaler::fit(&[[1.0], [2.0]]).unwrap();
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }
}
