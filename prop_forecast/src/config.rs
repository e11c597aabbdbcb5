//! Engine configuration: simulation defaults and decision thresholds
//!
//! Values come from a TOML file and can be overridden through environment
//! variables such as `SMARTPROP__SIMULATION__RUNS=2000`.

use crate::error::{ensure_finite, EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SMARTPROP";

/// Decision thresholds used by the verdict and the explainer.
///
/// The canonical set is a verdict cut at score 40, high demand above 75 and
/// high risk above 60. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Scores strictly above this are a strong opportunity
    pub verdict_score: f64,
    /// Demand strictly above this counts as high
    pub high_demand: f64,
    /// Risk strictly above this counts as high
    pub high_risk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            verdict_score: 40.0,
            high_demand: 75.0,
            high_risk: 60.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("thresholds.verdict_score", self.verdict_score)?;
        ensure_finite("thresholds.high_demand", self.high_demand)?;
        ensure_finite("thresholds.high_risk", self.high_risk)
    }
}

/// Monte Carlo defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Trials per simulation
    pub runs: usize,
    /// Standard deviation of the Gaussian noise on demand and risk
    pub noise_std: f64,
    /// Seed for reproducible reports; `None` leaves seeding to the caller
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            runs: 500,
            noise_std: 5.0,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(EngineError::InvalidParameter(
                "simulation.runs must be positive".to_string(),
            ));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "simulation.noise_std must be finite and non-negative, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation: SimulationSettings,
    pub thresholds: Thresholds,
}

impl EngineConfig {
    /// Load from a TOML file, then apply `SMARTPROP__*` environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<EngineConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        let config = settings.try_deserialize::<EngineConfig>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.thresholds.validate()
    }
}
