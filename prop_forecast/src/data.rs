//! Historical observations and the validated training set

use crate::error::{EngineError, Result};
use prop_math::statistics::population_std_dev;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Number of model features
pub const FEATURE_COUNT: usize = 3;

/// Canonical feature order shared by training and inference
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["Demand_Index", "Risk_Score", "Year"];

/// Columns an observation table must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["Area", "Year", "Demand_Index", "Risk_Score", "Avg_Price"];

/// Fewest observations accepted for training
pub const MIN_OBSERVATIONS: usize = 2;

/// Spreads below this count as a constant feature
const MIN_FEATURE_SPREAD: f64 = 1e-12;

/// One yearly record for an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Demand_Index")]
    pub demand_index: f64,
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Avg_Price")]
    pub avg_price: f64,
}

impl HistoricalObservation {
    pub fn new(area: &str, year: i32, demand_index: f64, risk_score: f64, avg_price: f64) -> Self {
        Self {
            area: area.to_string(),
            year,
            demand_index,
            risk_score,
            avg_price,
        }
    }

    /// Feature vector in [`FEATURE_NAMES`] order
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        feature_row(self.year, self.demand_index, self.risk_score)
    }
}

/// Build a feature row in canonical order
pub(crate) fn feature_row(year: i32, demand_index: f64, risk_score: f64) -> [f64; FEATURE_COUNT] {
    [demand_index, risk_score, f64::from(year)]
}

/// Values of one table column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            ColumnValues::Text(_) => "text",
            ColumnValues::Integer(_) => "integer",
            ColumnValues::Float(_) => "float",
        }
    }

    fn as_text(&self, name: &str) -> Result<&[String]> {
        match self {
            ColumnValues::Text(v) => Ok(v),
            other => Err(EngineError::Schema(format!(
                "Column {} must be text, found {}",
                name,
                other.kind()
            ))),
        }
    }

    fn as_floats(&self, name: &str) -> Result<Vec<f64>> {
        match self {
            ColumnValues::Float(v) => Ok(v.clone()),
            ColumnValues::Integer(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            other => Err(EngineError::Schema(format!(
                "Column {} must be numeric, found {}",
                name,
                other.kind()
            ))),
        }
    }

    fn as_years(&self, name: &str) -> Result<Vec<i32>> {
        let out_of_range =
            |v: String| EngineError::Schema(format!("Column {} holds a non-year value {}", name, v));

        match self {
            ColumnValues::Integer(v) => v
                .iter()
                .map(|&x| i32::try_from(x).map_err(|_| out_of_range(x.to_string())))
                .collect(),
            ColumnValues::Float(v) => v
                .iter()
                .map(|&x| {
                    if x.fract() == 0.0 && x >= f64::from(i32::MIN) && x <= f64::from(i32::MAX) {
                        Ok(x as i32)
                    } else {
                        Err(out_of_range(x.to_string()))
                    }
                })
                .collect(),
            other => Err(EngineError::Schema(format!(
                "Column {} must be integer, found {}",
                name,
                other.kind()
            ))),
        }
    }
}

/// Column-oriented table as handed over by an ingestion layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    columns: Vec<(String, ColumnValues)>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column
    pub fn with_column(mut self, name: &str, values: ColumnValues) -> Self {
        self.columns.retain(|(existing, _)| existing != name);
        self.columns.push((name.to_string(), values));
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn column(&self, name: &str) -> Option<&ColumnValues> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values)
    }

    /// Convert the table into typed rows, checking names, lengths and types
    pub fn to_observations(&self) -> Result<Vec<HistoricalObservation>> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::Schema(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let lookup = |name: &str| {
            self.column(name)
                .ok_or_else(|| EngineError::Schema(format!("Missing required column: {}", name)))
        };

        let areas = lookup("Area")?.as_text("Area")?;
        let years = lookup("Year")?.as_years("Year")?;
        let demand = lookup("Demand_Index")?.as_floats("Demand_Index")?;
        let risk = lookup("Risk_Score")?.as_floats("Risk_Score")?;
        let price = lookup("Avg_Price")?.as_floats("Avg_Price")?;

        let rows = areas.len();
        for name in REQUIRED_COLUMNS {
            let len = lookup(name)?.len();
            if len != rows {
                return Err(EngineError::Schema(format!(
                    "Column {} has {} values, expected {}",
                    name, len, rows
                )));
            }
        }

        Ok((0..rows)
            .map(|i| HistoricalObservation::new(&areas[i], years[i], demand[i], risk[i], price[i]))
            .collect())
    }
}

/// Validated, read-only training set for a single area
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    area: String,
    observations: Vec<HistoricalObservation>,
    features: Vec<[f64; FEATURE_COUNT]>,
    targets: Vec<f64>,
}

impl DataSet {
    /// Validate observations for one area.
    ///
    /// Rejects mixed areas, non-finite values, fewer than
    /// [`MIN_OBSERVATIONS`] rows and features without variance.
    pub fn new(observations: Vec<HistoricalObservation>) -> Result<Self> {
        let area = match observations.first() {
            Some(first) => first.area.clone(),
            None => {
                return Err(reject(EngineError::DegenerateDataset(
                    "Dataset has no observations".to_string(),
                )))
            }
        };

        if let Some(other) = observations.iter().find(|o| o.area != area) {
            return Err(reject(EngineError::Schema(format!(
                "Dataset mixes areas {} and {}; partition by area first",
                area, other.area
            ))));
        }

        if let Some(bad) = observations.iter().find(|o| {
            !(o.demand_index.is_finite() && o.risk_score.is_finite() && o.avg_price.is_finite())
        }) {
            return Err(reject(EngineError::DegenerateDataset(format!(
                "Observation for year {} holds a non-finite value",
                bad.year
            ))));
        }

        if observations.len() < MIN_OBSERVATIONS {
            return Err(reject(EngineError::DegenerateDataset(format!(
                "Need at least {} observations, got {}",
                MIN_OBSERVATIONS,
                observations.len()
            ))));
        }

        let features: Vec<[f64; FEATURE_COUNT]> =
            observations.iter().map(HistoricalObservation::features).collect();
        let targets: Vec<f64> = observations.iter().map(|o| o.avg_price).collect();

        for (column, name) in FEATURE_NAMES.iter().enumerate() {
            let values: Vec<f64> = features.iter().map(|row| row[column]).collect();
            if population_std_dev(&values)? < MIN_FEATURE_SPREAD {
                return Err(reject(EngineError::DegenerateDataset(format!(
                    "Feature {} has zero variance",
                    name
                ))));
            }
        }

        Ok(Self {
            area,
            observations,
            features,
            targets,
        })
    }

    /// Validate a column table holding a single area
    pub fn from_table(table: &ObservationTable) -> Result<Self> {
        Self::new(table.to_observations()?)
    }

    /// Split rows spanning several areas into one dataset per area
    pub fn partition_by_area(
        observations: Vec<HistoricalObservation>,
    ) -> Result<BTreeMap<String, DataSet>> {
        let mut grouped: BTreeMap<String, Vec<HistoricalObservation>> = BTreeMap::new();
        for observation in observations {
            grouped
                .entry(observation.area.clone())
                .or_default()
                .push(observation);
        }

        grouped
            .into_iter()
            .map(|(area, rows)| Ok((area, DataSet::new(rows)?)))
            .collect()
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[HistoricalObservation] {
        &self.observations
    }

    /// Feature matrix, one row per observation in [`FEATURE_NAMES`] order
    pub fn features(&self) -> &[[f64; FEATURE_COUNT]] {
        &self.features
    }

    /// Observed average prices aligned with [`DataSet::features`]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Most recent observation by year
    pub fn latest(&self) -> &HistoricalObservation {
        // Non-empty by construction; falls back to the first row on ties
        self.observations
            .iter()
            .fold(&self.observations[0], |best, o| if o.year > best.year { o } else { best })
    }
}

fn reject(err: EngineError) -> EngineError {
    warn!(error = %err, "rejected training data");
    err
}
