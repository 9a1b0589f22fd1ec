//! Tool-calling limits, thresholds, and default rates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global ceiling on tool invocations per run, across categorization,
/// win-likelihood, and time/cost analysis.
pub const MAX_TOOL_CALLS: u32 = 6;

/// Per-run cap on statute-retrieval calls.
pub const MAX_RETRIEVAL_CALLS: u32 = 3;

/// Per-run cap on historic-case lookups.
pub const MAX_HISTORIC_CALLS: u32 = 3;

/// Per-run cap on user-clarification round trips.
pub const MAX_CLARIFICATION_CALLS: u32 = 1;

/// Below this categorization confidence the pipeline asks the user to
/// disambiguate before committing to a category.
pub const MIN_CATEGORY_CONFIDENCE: f32 = 0.6;

/// Default court level assumed when the input does not name one.
pub const DEFAULT_COURT_LEVEL: &str = "district";

/// Jurisdiction every case is assumed to fall under.
pub const DEFAULT_JURISDICTION: &str = "CH";

/// Default hourly rate for lawyer time, in CHF.
pub const DEFAULT_HOURLY_RATE_LAWYER: f64 = 400.0;

/// Default hourly rate for paralegal time, in CHF.
pub const DEFAULT_HOURLY_RATE_PARALEGAL: f64 = 150.0;

/// Swiss VAT rate applied to fee subtotals.
pub const DEFAULT_VAT_RATE: f64 = 0.077;

/// Flat court-fee assumption for the deterministic cost fallback, in CHF.
pub const DEFAULT_COURT_FEES_CHF: f64 = 2000.0;

/// Absolute slack allowed between a cost total and the sum of its
/// breakdown components, in CHF.
pub const COST_SUM_TOLERANCE_CHF: f64 = 1.0;

/// Likelihood used when reasoning fails and no baseline exists.
pub const DEFAULT_LIKELIHOOD: u8 = 50;

/// Assessed complexity of a case, driving the time/cost fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Read a complexity assessment out of free-form LLM prose.
    ///
    /// "high" wins over "low" when both occur; anything else is medium.
    pub fn from_assessment(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("high") {
            Self::High
        } else if text.contains("low") {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_from_assessment() {
        assert_eq!(
            Complexity::from_assessment("This is a highly complex matter"),
            Complexity::High
        );
        assert_eq!(
            Complexity::from_assessment("Low complexity, routine filing"),
            Complexity::Low
        );
        assert_eq!(
            Complexity::from_assessment("A standard dispute"),
            Complexity::Medium
        );
        // "high" takes precedence when both words appear
        assert_eq!(
            Complexity::from_assessment("low evidence quality but high procedural complexity"),
            Complexity::High
        );
    }

    #[test]
    fn test_budget_constants_consistent() {
        // The per-tool caps must not individually exceed the global ceiling.
        assert!(MAX_RETRIEVAL_CALLS <= MAX_TOOL_CALLS);
        assert!(MAX_HISTORIC_CALLS <= MAX_TOOL_CALLS);
        assert!(MAX_CLARIFICATION_CALLS <= MAX_TOOL_CALLS);
    }
}
