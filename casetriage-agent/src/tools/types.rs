//! Input/output contracts for the external tools.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use casetriage_policy::{Category, Complexity};

/// Swiss law document returned by statute retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub id: String,
    pub title: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

/// Outcome of a historic case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOutcome {
    Win,
    Loss,
    Settled,
}

impl CaseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Settled => "settled",
        }
    }
}

/// A historic case with its outcome, for precedent comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricCase {
    pub id: String,
    pub court: String,
    pub year: i32,
    pub summary: String,
    pub outcome: CaseOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

/// Unit of a time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    #[default]
    Months,
}

impl TimeUnit {
    /// Label for a count of `value` in this unit ("day"/"days", …).
    pub fn label(&self, value: u32) -> &'static str {
        match (self, value) {
            (Self::Days, 1) => "day",
            (Self::Days, _) => "days",
            (Self::Weeks, 1) => "week",
            (Self::Weeks, _) => "weeks",
            (Self::Months, 1) => "month",
            (Self::Months, _) => "months",
        }
    }

    /// Rough elapsed hours per unit, used by the cost fallback.
    pub fn hours(&self) -> f64 {
        match self {
            Self::Days => 24.0,
            Self::Weeks => 168.0,
            Self::Months => 720.0,
        }
    }
}

/// Estimated duration of the proceedings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub value: u32,
    pub unit: TimeUnit,
}

impl TimeEstimate {
    pub fn new(value: u32, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn months(value: u32) -> Self {
        Self::new(value, TimeUnit::Months)
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.label(self.value))
    }
}

/// Estimated cost: a flat total or an itemized breakdown.
///
/// Serialized untagged, so a flat estimate is a bare number and a breakdown
/// is an object - both JSON forms the downstream consumers accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostEstimate {
    Total(f64),
    Breakdown {
        total_chf: f64,
        breakdown: BTreeMap<String, f64>,
    },
}

impl CostEstimate {
    /// The total in CHF, whichever form the estimate takes.
    pub fn total_chf(&self) -> f64 {
        match self {
            Self::Total(total) => *total,
            Self::Breakdown { total_chf, .. } => *total_chf,
        }
    }

    /// Sum of the breakdown components, if a breakdown is present.
    pub fn components_sum(&self) -> Option<f64> {
        match self {
            Self::Total(_) => None,
            Self::Breakdown { breakdown, .. } => Some(breakdown.values().sum()),
        }
    }

    /// Whether every amount in the estimate is non-negative.
    pub fn is_non_negative(&self) -> bool {
        match self {
            Self::Total(total) => *total >= 0.0,
            Self::Breakdown { total_chf, breakdown } => {
                *total_chf >= 0.0 && breakdown.values().all(|v| *v >= 0.0)
            }
        }
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} CHF", self.total_chf().round() as i64)
    }
}

/// Facts about a case, assembled across the pipeline and handed to the
/// time estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFacts {
    /// Normalized case text
    pub text: String,
    /// Jurisdiction the case falls under
    pub jurisdiction: String,
    /// Category, once classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Assessed complexity
    pub complexity: Complexity,
    /// Court level
    pub court_level: String,
    /// Number of judges, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judges_count: Option<u32>,
    /// Whether an appeal is expected
    pub appeal_expected: bool,
    /// Clarification the user supplied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification: Option<String>,
}

/// Inputs to the cost estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub time_estimate: TimeEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judges_count: Option<u32>,
    /// Hourly rates by role, e.g. {"lawyer": 400, "paralegal": 150}
    pub hourly_rates: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expert_witness_fees: Option<f64>,
    pub vat_rate: f64,
}
