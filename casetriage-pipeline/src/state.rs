//! Case input, per-run working state, and the final output.

use serde::{Deserialize, Serialize};

use casetriage_agent::{CaseFacts, CostEstimate, Doc, TimeEstimate, TimeUnit};
use casetriage_policy::{Baseline, Category, CategoryResult, Subcategory};

use crate::budget::ToolBudget;
use crate::trace::RunTrace;

/// Input language of a case description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    Fr,
    It,
    En,
}

/// Optional metadata accompanying a case description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_units: Option<TimeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judges_count: Option<u32>,
}

/// A case submitted for analysis. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    /// User-provided case description
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CaseMetadata>,
}

impl CaseInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: CaseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Working state of one pipeline run.
///
/// Created by ingest and handed from node to node by value; every node
/// returns the next state. Discarded after aggregation.
#[derive(Debug)]
pub struct CaseState {
    /// The original input
    pub input: CaseInput,
    /// Normalized case text
    pub text: String,
    /// Input language
    pub language: Language,
    /// Unit preference for time output
    pub preferred_units: TimeUnit,
    /// Facts assembled for the estimators
    pub facts: CaseFacts,
    /// Classification result, set once by categorize
    pub category: Option<CategoryResult>,
    /// Detected subcategory, if the category has a subcategory model
    pub subcategory: Option<Subcategory>,
    /// Baseline the subcategory maps to
    pub baseline: Option<Baseline>,
    /// Win likelihood in [1, 100]
    pub likelihood: Option<u8>,
    /// Estimated duration
    pub time_estimate: Option<TimeEstimate>,
    /// Estimated cost
    pub cost_estimate: Option<CostEstimate>,
    /// Explanation fragments collected along the way
    pub explanations: Vec<String>,
    /// Source documents consulted during analysis
    pub sources: Vec<Doc>,
    /// Per-run tool-call budget
    pub budget: ToolBudget,
    /// Per-run trace
    pub trace: RunTrace,
}

impl CaseState {
    /// Append an explanation fragment.
    pub fn explain(&mut self, fragment: impl Into<String>) {
        self.explanations.push(fragment.into());
    }

    /// The category, if classification has run.
    pub fn category(&self) -> Option<Category> {
        self.category.map(|c| c.category)
    }
}

/// The externally visible result of a run. JSON-serializable.
///
/// `likelihood_win`, `estimated_time`, and `estimated_cost` are null
/// exactly when `category` is [`Category::Other`]; otherwise all three are
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Legal case category
    pub category: Category,
    /// Likelihood of winning, percentage in [1, 100]
    pub likelihood_win: Option<u8>,
    /// Human-readable time estimate (e.g., "6 months")
    pub estimated_time: Option<String>,
    /// Cost estimate: flat total or itemized breakdown
    pub estimated_cost: Option<CostEstimate>,
    /// Reasoning and caveats collected during the analysis
    pub explanation: String,
    /// Source documents used in the analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_documents: Vec<Doc>,
    /// Customer-facing summary, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
}

impl AgentOutput {
    /// Whether the three estimates are jointly present or jointly absent.
    pub fn estimates_consistent(&self) -> bool {
        let present = [
            self.likelihood_win.is_some(),
            self.estimated_time.is_some(),
            self.estimated_cost.is_some(),
        ];
        present.iter().all(|p| *p) || present.iter().all(|p| !*p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_serializes_nulls_for_other() {
        let output = AgentOutput {
            category: Category::Other,
            likelihood_win: None,
            estimated_time: None,
            estimated_cost: None,
            explanation: "no analysis available for this category".to_string(),
            source_documents: Vec::new(),
            final_answer: None,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["category"], "other");
        assert!(json["likelihood_win"].is_null());
        assert!(json["estimated_time"].is_null());
        assert!(json["estimated_cost"].is_null());
        assert!(json.get("final_answer").is_none());
    }

    #[test]
    fn test_estimates_consistency_check() {
        let mut output = AgentOutput {
            category: Category::EmploymentLaw,
            likelihood_win: Some(80),
            estimated_time: Some("6 months".to_string()),
            estimated_cost: Some(CostEstimate::Total(2500.0)),
            explanation: "x".to_string(),
            source_documents: Vec::new(),
            final_answer: None,
        };
        assert!(output.estimates_consistent());

        output.estimated_cost = None;
        assert!(!output.estimates_consistent());
    }
}
