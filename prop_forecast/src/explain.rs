//! Rule-based narrative for demand and risk levels

use crate::config::Thresholds;

pub const HIGH_DEMAND: &str = "high demand drives appreciation";
pub const MODERATE_DEMAND: &str = "moderate demand limits upside";
pub const HIGH_RISK: &str = "risk suppresses valuation";
pub const ACCEPTABLE_RISK: &str = "risk is within acceptable range";

/// Maps demand and risk onto a two-statement narrative.
///
/// The demand statement always comes first, then the risk statement.
/// Thresholds never depend on the data. The defaults are the canonical
/// cut-offs (demand above 75, risk above 60); an explainer built from
/// [`Thresholds`] in the engine configuration overrides them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Explainer {
    thresholds: Thresholds,
}

impl Explainer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn explain(&self, demand_index: f64, risk_score: f64) -> Vec<String> {
        let demand = if demand_index > self.thresholds.high_demand {
            HIGH_DEMAND
        } else {
            MODERATE_DEMAND
        };

        let risk = if risk_score > self.thresholds.high_risk {
            HIGH_RISK
        } else {
            ACCEPTABLE_RISK
        };

        vec![demand.to_string(), risk.to_string()]
    }
}

/// Narrative with the canonical thresholds
pub fn explain(demand_index: f64, risk_score: f64) -> Vec<String> {
    Explainer::default().explain(demand_index, risk_score)
}
