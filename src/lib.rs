//! # SmartProp
//!
//! Investment analysis for real-estate areas: a validated history of demand,
//! risk and price per area goes in, an executive report with a price
//! forecast, investment score, simulated price range, verdict and narrative
//! comes out.
//!
//! The work is split across two crates:
//!
//! - [`prop_math`]: statistics, feature scaling and least squares
//! - [`prop_forecast`]: datasets, the price model, scoring, simulation and reports
//!
//! ## Example
//!
//! ```
//! use smartprop_workspace::{explain, investment_score, Verdict, Thresholds};
//!
//! let score = investment_score(80.0, 40.0);
//! assert_eq!(score, 40.0);
//! assert_eq!(Verdict::from_score(score, &Thresholds::default()), Verdict::Caution);
//! assert_eq!(explain(80.0, 30.0).len(), 2);
//! ```

pub use prop_forecast;
pub use prop_math;

pub use prop_forecast::{
    explain, investment_score, simulate, Assistant, AssistantContext, DataSet, EngineConfig,
    EngineError, ExecutiveReport, ForecastModel, ForecastRequest, HistoricalObservation,
    ObservationTable, ReportAggregator, RiskSimulator, SimulationResult, Thresholds, Verdict,
};
