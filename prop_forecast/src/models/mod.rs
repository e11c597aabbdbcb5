//! Price models and the slot that publishes the current trained model

use crate::data::DataSet;
use crate::error::{EngineError, Result};
use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

pub mod linear;

pub use linear::{FitMetrics, TrainedModel};

/// Trained price model that can be queried for point forecasts
pub trait TrainedForecastModel: Debug + Send + Sync {
    /// Forecast the average price for one set of inputs, rounded to two decimals
    fn forecast_price(&self, year: i32, demand_index: f64, risk_score: f64) -> Result<f64>;

    /// Unrounded in-sample predictions for every observation of `data`
    fn predict(&self, data: &DataSet) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Holder of the currently published [`TrainedModel`].
///
/// Training fits a complete model off to the side and then swaps it in under
/// a short write lock. Readers take an `Arc` snapshot, so a forecast or
/// simulation that started before a retrain finishes on the parameters it
/// started with.
#[derive(Debug, Default)]
pub struct ForecastModel {
    current: RwLock<Option<Arc<TrainedModel>>>,
}

impl ForecastModel {
    /// Create an untrained model
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit on `data` and publish the result, replacing any previous fit
    pub fn train(&self, data: &DataSet) -> Result<Arc<TrainedModel>> {
        let trained = Arc::new(TrainedModel::fit(data)?);

        {
            let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *slot = Some(Arc::clone(&trained));
        }

        info!(
            area = data.area(),
            rows = data.len(),
            r_squared = trained.metrics().r_squared,
            rmse = trained.metrics().rmse,
            "published trained price model"
        );

        Ok(trained)
    }

    /// Handle to the current trained parameters
    pub fn snapshot(&self) -> Result<Arc<TrainedModel>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(EngineError::NotTrained)
    }

    pub fn is_trained(&self) -> bool {
        self.snapshot().is_ok()
    }

    /// Point forecast against the current trained parameters
    pub fn forecast_price(&self, year: i32, demand_index: f64, risk_score: f64) -> Result<f64> {
        self.snapshot()?
            .forecast_price(year, demand_index, risk_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HistoricalObservation;

    fn dataset(offset: f64) -> DataSet {
        DataSet::new(vec![
            HistoricalObservation::new("Test", 2020, 60.0, 55.0, 6200.0 + offset),
            HistoricalObservation::new("Test", 2021, 65.0, 50.0, 6500.0 + offset),
            HistoricalObservation::new("Test", 2022, 72.0, 49.0, 6900.0 + offset),
            HistoricalObservation::new("Test", 2023, 80.0, 45.0, 7600.0 + offset),
        ])
        .unwrap()
    }

    #[test]
    fn test_untrained_model_refuses_to_forecast() {
        let model = ForecastModel::new();
        assert!(!model.is_trained());
        assert!(matches!(
            model.forecast_price(2030, 80.0, 40.0),
            Err(EngineError::NotTrained)
        ));
    }

    #[test]
    fn test_snapshot_survives_retraining() {
        let model = ForecastModel::new();
        model.train(&dataset(0.0)).unwrap();
        let before = model.snapshot().unwrap();
        let old_price = before.forecast_price(2024, 85.0, 40.0).unwrap();

        model.train(&dataset(1000.0)).unwrap();

        assert_eq!(before.forecast_price(2024, 85.0, 40.0).unwrap(), old_price);
        let new_price = model.forecast_price(2024, 85.0, 40.0).unwrap();
        assert!((new_price - old_price - 1000.0).abs() < 0.02);
    }
}
