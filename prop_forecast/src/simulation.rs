//! Monte Carlo spread of the price forecast under noisy demand and risk

use crate::config::SimulationSettings;
use crate::error::{ensure_finite, EngineError, Result};
use crate::models::{ForecastModel, TrainedForecastModel};
use prop_math::statistics::{mean, min_max, round_to};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Range and mean of simulated prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean of all trials, rounded to two decimals
    pub expected: f64,
    pub runs: usize,
}

impl SimulationResult {
    /// Aggregate collected trial prices
    pub fn from_prices(prices: &[f64]) -> Result<Self> {
        let (min, max) = min_max(prices)?;
        // Rounding the mean must not push it outside the observed range
        let expected = round_to(mean(prices)?, 2).clamp(min, max);

        Ok(Self {
            min,
            max,
            expected,
            runs: prices.len(),
        })
    }

    /// Width of the simulated price range
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Runs repeated forecasts with Gaussian noise on demand and risk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSimulator {
    runs: usize,
    noise_std: f64,
}

impl RiskSimulator {
    /// Create a simulator; `runs` must be positive and `noise_std` finite and non-negative
    pub fn new(runs: usize, noise_std: f64) -> Result<Self> {
        SimulationSettings {
            runs,
            noise_std,
            seed: None,
        }
        .validate()?;

        Ok(Self { runs, noise_std })
    }

    pub fn from_settings(settings: &SimulationSettings) -> Result<Self> {
        Self::new(settings.runs, settings.noise_std)
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Run every trial against the same trained `model`, drawing from `rng`.
    ///
    /// Each trial draws demand first, then risk. The draw sequence is fully
    /// determined by the generator state, so a seeded generator reproduces
    /// the result exactly.
    pub fn simulate<M, R>(
        &self,
        model: &M,
        year: i32,
        demand_index: f64,
        risk_score: f64,
        rng: &mut R,
    ) -> Result<SimulationResult>
    where
        M: TrainedForecastModel + ?Sized,
        R: Rng + ?Sized,
    {
        ensure_finite("demand_index", demand_index)?;
        ensure_finite("risk_score", risk_score)?;

        let demand_noise = normal(demand_index, self.noise_std)?;
        let risk_noise = normal(risk_score, self.noise_std)?;

        let mut prices = Vec::with_capacity(self.runs);
        for _ in 0..self.runs {
            let demand = demand_noise.sample(rng);
            let risk = risk_noise.sample(rng);
            prices.push(model.forecast_price(year, demand, risk)?);
        }

        let result = SimulationResult::from_prices(&prices)?;
        debug!(
            runs = self.runs,
            noise_std = self.noise_std,
            min = result.min,
            max = result.max,
            expected = result.expected,
            "simulation finished"
        );

        Ok(result)
    }

    /// [`RiskSimulator::simulate`] with a fresh `StdRng` seeded from `seed`
    pub fn simulate_seeded<M>(
        &self,
        model: &M,
        year: i32,
        demand_index: f64,
        risk_score: f64,
        seed: u64,
    ) -> Result<SimulationResult>
    where
        M: TrainedForecastModel + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        self.simulate(model, year, demand_index, risk_score, &mut rng)
    }
}

/// Simulate against the model currently published in `model`.
///
/// The trained parameters are captured once, so a concurrent retrain does
/// not affect trials already under way.
pub fn simulate<R: Rng + ?Sized>(
    model: &ForecastModel,
    demand_index: f64,
    risk_score: f64,
    year: i32,
    runs: usize,
    noise_std: f64,
    rng: &mut R,
) -> Result<SimulationResult> {
    let trained = model.snapshot()?;
    RiskSimulator::new(runs, noise_std)?.simulate(&*trained, year, demand_index, risk_score, rng)
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| {
        EngineError::InvalidParameter(format!(
            "Cannot sample N({}, {}): {}",
            mean, std_dev, e
        ))
    })
}
