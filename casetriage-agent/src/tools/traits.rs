//! One trait per external tool.
//!
//! The pipeline receives implementations at construction time; swapping a
//! tool for a test double never needs global state. Every tool is fallible
//! the same way: it is either unavailable, timed out, or failed - all
//! recoverable conditions the caller degrades around.

use async_trait::async_trait;

use casetriage_policy::CategoryResult;

use super::types::{CaseFacts, CostEstimate, CostInputs, Doc, HistoricCase, TimeEstimate};

/// Error types for tool invocations. None of these abort a run; the
/// pipeline falls back to deterministic estimates and records a caveat.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    /// The collaborator behind the tool is not implemented or not reachable
    #[error("Tool unavailable: {0}")]
    Unavailable(String),

    /// The collaborator did not answer in time
    #[error("Tool timed out: {0}")]
    Timeout(String),

    /// The collaborator answered with an error
    #[error("Tool failed: {0}")]
    Failed(String),
}

/// Classifies a case description into a legal category.
#[async_trait]
pub trait CaseCategorizer: Send + Sync {
    async fn categorize(&self, text: &str) -> Result<CategoryResult, ToolError>;
}

/// Retrieves relevant Swiss law documents.
#[async_trait]
pub trait LawRetriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Doc>, ToolError>;
}

/// Finds similar historic cases with outcomes.
#[async_trait]
pub trait HistoricCaseRetriever: Send + Sync {
    async fn similar_cases(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<HistoricCase>, ToolError>;
}

/// Estimates the duration of the proceedings from case facts.
#[async_trait]
pub trait TimeEstimator: Send + Sync {
    async fn estimate_time(&self, facts: &CaseFacts) -> Result<TimeEstimate, ToolError>;
}

/// Estimates the cost of the proceedings.
#[async_trait]
pub trait CostEstimator: Send + Sync {
    async fn estimate_cost(&self, inputs: &CostInputs) -> Result<CostEstimate, ToolError>;
}

/// Asks the user for missing information.
///
/// Implemented by the surrounding application (UI callback). When
/// unavailable the pipeline proceeds with its best guess and records a
/// caveat.
#[async_trait]
pub trait UserClarifier: Send + Sync {
    async fn clarify(&self, question: &str, missing_fields: &[String]) -> Result<String, ToolError>;
}
