//! Investment score and verdict

use crate::config::Thresholds;
use prop_math::statistics::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of the demand index in the score
pub const DEMAND_WEIGHT: f64 = 0.7;

/// Weight of the risk score in the score (subtracted)
pub const RISK_WEIGHT: f64 = 0.4;

/// `round(0.7·demand − 0.4·risk, 2)`
///
/// Order matters: the first argument is demand and is rewarded, the second
/// is risk and is penalized.
pub fn investment_score(demand_index: f64, risk_score: f64) -> f64 {
    round_to(DEMAND_WEIGHT * demand_index - RISK_WEIGHT * risk_score, 2)
}

/// Categorical recommendation derived from the investment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "STRONG OPPORTUNITY")]
    StrongOpportunity,
    #[serde(rename = "CAUTION")]
    Caution,
}

impl Verdict {
    /// Strong opportunity when the score is strictly above the threshold
    pub fn from_score(score: f64, thresholds: &Thresholds) -> Self {
        if score > thresholds.verdict_score {
            Verdict::StrongOpportunity
        } else {
            Verdict::Caution
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::StrongOpportunity => "STRONG OPPORTUNITY",
            Verdict::Caution => "CAUTION",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
