//! # Prop Forecast
//!
//! Decision support for real-estate investment areas.
//!
//! ## Features
//!
//! - Validated historical observations (area, year, demand, risk, price)
//! - Standardized linear price model with atomic retraining
//! - Investment score and verdict
//! - Monte Carlo price spread with an injectable random source
//! - Rule-based narrative and keyword assistant
//! - Executive report aggregation
//!
//! ## Quick Start
//!
//! ```rust
//! use prop_forecast::{
//!     DataSet, EngineConfig, ForecastModel, ForecastRequest, HistoricalObservation,
//!     ReportAggregator,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> prop_forecast::Result<()> {
//! let rows = vec![
//!     HistoricalObservation::new("North Riyadh", 2020, 60.0, 55.0, 6200.0),
//!     HistoricalObservation::new("North Riyadh", 2021, 65.0, 50.0, 6500.0),
//!     HistoricalObservation::new("North Riyadh", 2022, 70.0, 48.0, 6900.0),
//!     HistoricalObservation::new("North Riyadh", 2023, 80.0, 45.0, 7600.0),
//! ];
//!
//! // Train once per dataset version
//! let model = Arc::new(ForecastModel::new());
//! model.train(&DataSet::new(rows)?)?;
//!
//! // Query many times
//! let aggregator = ReportAggregator::new(model, &EngineConfig::default())?;
//! let report = aggregator.report_seeded(&ForecastRequest::new("North Riyadh", 2030, 95.0, 30.0), 42)?;
//!
//! assert_eq!(report.investment_score(), 54.5);
//! assert_eq!(report.verdict().as_str(), "STRONG OPPORTUNITY");
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod data;
pub mod error;
pub mod explain;
pub mod models;
pub mod report;
pub mod scoring;
pub mod simulation;

// Re-export commonly used types
pub use crate::assistant::{Assistant, AssistantContext};
pub use crate::config::{EngineConfig, SimulationSettings, Thresholds};
pub use crate::data::{ColumnValues, DataSet, HistoricalObservation, ObservationTable};
pub use crate::error::{EngineError, Result};
pub use crate::explain::{explain, Explainer};
pub use crate::models::{FitMetrics, ForecastModel, TrainedForecastModel, TrainedModel};
pub use crate::report::{ExecutiveReport, ForecastRequest, ReportAggregator};
pub use crate::scoring::{investment_score, Verdict};
pub use crate::simulation::{simulate, RiskSimulator, SimulationResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
