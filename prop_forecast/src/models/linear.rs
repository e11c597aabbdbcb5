//! Standardized linear regression of price on demand, risk and year

use crate::data::{feature_row, DataSet, FEATURE_COUNT, FEATURE_NAMES};
use crate::error::{ensure_finite, EngineError, Result};
use crate::models::TrainedForecastModel;
use prop_math::statistics::round_to;
use prop_math::{LeastSquares, LeastSquaresFit, StandardScaler};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL_NAME: &str = "Standardized linear regression (demand, risk, year)";

/// In-sample fit diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

/// Fitted scaler and regression parameters for one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    area: String,
    observations: usize,
    scaler: StandardScaler,
    regression: LeastSquaresFit,
    metrics: FitMetrics,
}

impl TrainedModel {
    /// Full refit on `data`; standardization statistics come from `data` only
    pub fn fit(data: &DataSet) -> Result<Self> {
        let scaler = StandardScaler::fit(data.features()).map_err(|e| {
            EngineError::DegenerateDataset(format!("Cannot standardize features: {}", e))
        })?;
        let scaled = scaler.transform_all(data.features())?;
        let regression = LeastSquares.fit(&scaled, data.targets())?;

        let mut model = Self {
            area: data.area().to_string(),
            observations: data.len(),
            scaler,
            regression,
            metrics: FitMetrics {
                mae: 0.0,
                rmse: 0.0,
                r_squared: 0.0,
            },
        };

        let predicted = model.predict(data)?;
        let n = predicted.len() as f64;
        let errors: Vec<f64> = predicted
            .iter()
            .zip(data.targets())
            .map(|(p, y)| y - p)
            .collect();

        model.metrics = FitMetrics {
            mae: errors.iter().map(|e| e.abs()).sum::<f64>() / n,
            rmse: (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt(),
            r_squared: model.regression.r_squared(&scaled, data.targets())?,
        };

        Ok(model)
    }

    /// Area the model was trained for
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Number of observations used for training
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Feature means in [`FEATURE_NAMES`] order
    pub fn feature_means(&self) -> &[f64] {
        self.scaler.means()
    }

    /// Feature standard deviations in [`FEATURE_NAMES`] order
    pub fn feature_std_devs(&self) -> &[f64] {
        self.scaler.std_devs()
    }

    /// Coefficients on standardized features in [`FEATURE_NAMES`] order
    pub fn coefficients(&self) -> &[f64] {
        self.regression.coefficients()
    }

    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }

    pub fn metrics(&self) -> &FitMetrics {
        &self.metrics
    }

    /// Coefficients paired with their feature names
    pub fn named_coefficients(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES
            .iter()
            .copied()
            .zip(self.coefficients().iter().copied())
            .collect()
    }

    fn raw_forecast(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let scaled = self.scaler.transform(row)?;
        Ok(self.regression.predict(&scaled)?)
    }
}

impl TrainedForecastModel for TrainedModel {
    fn forecast_price(&self, year: i32, demand_index: f64, risk_score: f64) -> Result<f64> {
        ensure_finite("demand_index", demand_index)?;
        ensure_finite("risk_score", risk_score)?;

        let price = self.raw_forecast(&feature_row(year, demand_index, risk_score))?;
        if !price.is_finite() {
            return Err(EngineError::InvalidParameter(format!(
                "Forecast for year {} overflowed",
                year
            )));
        }

        let price = round_to(price, 2);
        debug!(year, demand_index, risk_score, price, "point forecast");
        Ok(price)
    }

    fn predict(&self, data: &DataSet) -> Result<Vec<f64>> {
        data.features()
            .iter()
            .map(|row| self.raw_forecast(row))
            .collect()
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HistoricalObservation;
    use approx::assert_abs_diff_eq;

    /// price = 40·demand − 25·risk + 150·(year − 2020) + 4000
    fn linear_data() -> DataSet {
        let rows = [
            (2020, 60.0, 55.0),
            (2021, 62.0, 50.0),
            (2022, 70.0, 52.0),
            (2023, 71.0, 44.0),
            (2024, 85.0, 41.0),
            (2025, 88.0, 47.0),
        ];
        DataSet::new(
            rows.iter()
                .map(|&(year, demand, risk)| {
                    let price = 40.0 * demand - 25.0 * risk + 150.0 * f64::from(year - 2020) + 4000.0;
                    HistoricalObservation::new("Linear", year, demand, risk, price)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_recovers_linear_relationship() {
        let model = TrainedModel::fit(&linear_data()).unwrap();

        let expected = 40.0 * 95.0 - 25.0 * 30.0 + 150.0 * 10.0 + 4000.0;
        assert_abs_diff_eq!(model.forecast_price(2030, 95.0, 30.0).unwrap(), expected, epsilon = 0.011);
        assert_abs_diff_eq!(model.metrics().r_squared, 1.0, epsilon = 1e-9);
        assert!(model.metrics().rmse < 1e-6);
    }

    #[test]
    fn test_scaler_statistics_come_from_training_rows() {
        let data = linear_data();
        let model = TrainedModel::fit(&data).unwrap();

        assert_eq!(model.feature_means().len(), FEATURE_COUNT);
        assert_abs_diff_eq!(model.feature_means()[2], 2022.5, epsilon = 1e-9);
        assert_eq!(model.named_coefficients()[0].0, "Demand_Index");
        assert_eq!(model.observations(), data.len());
    }

    #[test]
    fn test_forecast_is_rounded_to_cents() {
        let model = TrainedModel::fit(&linear_data()).unwrap();
        let price = model.forecast_price(2026, 77.7, 43.3).unwrap();
        assert_abs_diff_eq!(price * 100.0, (price * 100.0).round(), epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        let model = TrainedModel::fit(&linear_data()).unwrap();
        assert!(matches!(
            model.forecast_price(2030, f64::NAN, 30.0),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            model.forecast_price(2030, 80.0, f64::INFINITY),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}
