//! Executive report assembly

use crate::config::{EngineConfig, Thresholds};
use crate::error::{ensure_finite, EngineError, Result};
use crate::explain::Explainer;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::scoring::{investment_score, Verdict};
use crate::simulation::{RiskSimulator, SimulationResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Inputs for one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub area: String,
    pub year: i32,
    pub demand_index: f64,
    pub risk_score: f64,
}

impl ForecastRequest {
    pub fn new(area: &str, year: i32, demand_index: f64, risk_score: f64) -> Self {
        Self {
            area: area.to_string(),
            year,
            demand_index,
            risk_score,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("demand_index", self.demand_index)?;
        ensure_finite("risk_score", self.risk_score)
    }
}

/// Complete answer for one request. Built in one step and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveReport {
    area: String,
    year: i32,
    predicted_price: f64,
    investment_score: f64,
    simulation: SimulationResult,
    verdict: Verdict,
    narrative: Vec<String>,
}

impl ExecutiveReport {
    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn predicted_price(&self) -> f64 {
        self.predicted_price
    }

    pub fn investment_score(&self) -> f64 {
        self.investment_score
    }

    pub fn simulation(&self) -> &SimulationResult {
        &self.simulation
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Demand statement followed by the risk statement
    pub fn narrative(&self) -> &[String] {
        &self.narrative
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Combines forecast, score, simulation and narrative into an [`ExecutiveReport`]
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    model: Arc<ForecastModel>,
    simulator: RiskSimulator,
    explainer: Explainer,
    thresholds: Thresholds,
    seed: Option<u64>,
}

impl ReportAggregator {
    pub fn new(model: Arc<ForecastModel>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            model,
            simulator: RiskSimulator::from_settings(&config.simulation)?,
            explainer: Explainer::new(config.thresholds),
            thresholds: config.thresholds,
            seed: config.simulation.seed,
        })
    }

    /// Build a report, drawing simulation noise from `rng`.
    ///
    /// The trained parameters are captured once so the point forecast and
    /// every simulation trial use the same fit. Any failure is returned as
    /// is and no report is produced.
    pub fn report<R: Rng + ?Sized>(
        &self,
        request: &ForecastRequest,
        rng: &mut R,
    ) -> Result<ExecutiveReport> {
        request.validate()?;
        let trained = self.model.snapshot()?;

        if trained.area() != request.area {
            return Err(EngineError::InvalidParameter(format!(
                "Model is trained for {}, request is for {}",
                trained.area(),
                request.area
            )));
        }

        let predicted_price =
            trained.forecast_price(request.year, request.demand_index, request.risk_score)?;
        let score = investment_score(request.demand_index, request.risk_score);
        let simulation = self.simulator.simulate(
            &*trained,
            request.year,
            request.demand_index,
            request.risk_score,
            rng,
        )?;
        let narrative = self
            .explainer
            .explain(request.demand_index, request.risk_score);
        let verdict = Verdict::from_score(score, &self.thresholds);

        info!(
            area = %request.area,
            year = request.year,
            predicted_price,
            score,
            verdict = %verdict,
            "executive report ready"
        );

        Ok(ExecutiveReport {
            area: request.area.clone(),
            year: request.year,
            predicted_price,
            investment_score: score,
            simulation,
            verdict,
            narrative,
        })
    }

    /// Seed taken from `simulation.seed`, if one was configured
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Build a report with a `StdRng` seeded from the configured seed.
    ///
    /// Without a configured seed there is no reproducible source to draw
    /// from, so the caller must use [`ReportAggregator::report`] with its
    /// own generator instead.
    pub fn report_configured(&self, request: &ForecastRequest) -> Result<ExecutiveReport> {
        let seed = self.seed.ok_or_else(|| {
            EngineError::InvalidParameter(
                "simulation.seed is not configured; pass a generator explicitly".to_string(),
            )
        })?;
        self.report_seeded(request, seed)
    }

    /// [`ReportAggregator::report`] with a `StdRng` seeded from `seed`
    pub fn report_seeded(&self, request: &ForecastRequest, seed: u64) -> Result<ExecutiveReport> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.report(request, &mut rng)
    }
}
