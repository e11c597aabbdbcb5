//! Keyword-routed answers about a finished report
//!
//! Questions are matched against an ordered rule table; the first rule with a
//! matching keyword answers. Unmatched questions return `None` so the caller
//! can hand them to whatever free-form backend it uses.

use crate::report::{ExecutiveReport, ForecastRequest};
use std::fmt;

/// Everything a rule may draw on when answering
#[derive(Debug, Clone, Copy)]
pub struct AssistantContext<'a> {
    pub request: &'a ForecastRequest,
    pub report: &'a ExecutiveReport,
    /// Latest observed average price for the area
    pub current_price: f64,
}

type Handler = fn(&AssistantContext<'_>) -> String;

/// One keyword rule
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    handler: Handler,
}

impl Rule {
    pub fn new(name: &'static str, keywords: &'static [&'static str], handler: Handler) -> Self {
        Self {
            name,
            keywords,
            handler,
        }
    }

    fn matches(&self, question: &str) -> bool {
        self.keywords.iter().any(|k| question.contains(k))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// Ordered pattern-to-handler table
#[derive(Debug, Clone)]
pub struct Assistant {
    rules: Vec<Rule>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::new("why", &["why", "ليش"], explain_recommendation),
                Rule::new("investment", &["good", "invest", "استثمار"], price_outlook),
                Rule::new("compare", &["compare", "قارن"], comparison_unavailable),
            ],
        }
    }
}

impl Assistant {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Name of the first rule matching `question`, if any
    pub fn route(&self, question: &str) -> Option<&'static str> {
        let question = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&question))
            .map(|rule| rule.name)
    }

    /// Answer from the first matching rule
    pub fn answer(&self, question: &str, context: &AssistantContext<'_>) -> Option<String> {
        let question = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&question))
            .map(|rule| (rule.handler)(context))
    }
}

fn explain_recommendation(ctx: &AssistantContext<'_>) -> String {
    format!(
        "The recommendation is based on demand ({}) and risk ({}): {}. Verdict: {}.",
        ctx.request.demand_index,
        ctx.request.risk_score,
        ctx.report.narrative().join("; "),
        ctx.report.verdict()
    )
}

fn price_outlook(ctx: &AssistantContext<'_>) -> String {
    format!(
        "{} shows a predicted price of {:.0} per m² for {} compared to the current {:.0}. \
         This suggests: {}.",
        ctx.report.area(),
        ctx.report.predicted_price(),
        ctx.report.year(),
        ctx.current_price,
        ctx.report.verdict()
    )
}

fn comparison_unavailable(_ctx: &AssistantContext<'_>) -> String {
    "Comparison across areas is not available; each model covers a single area.".to_string()
}
