//! Stub tools.
//!
//! The production collaborators behind categorization, retrieval, and
//! estimation are owned by other teams and not implemented here. The stub
//! reports every tool as unavailable, which exercises exactly the fallback
//! paths a production outage would.

use async_trait::async_trait;

use casetriage_policy::CategoryResult;

use super::traits::*;
use super::types::{CaseFacts, CostEstimate, CostInputs, Doc, HistoricCase, TimeEstimate};

/// Implements every tool trait by reporting unavailability.
pub struct StubTools;

#[async_trait]
impl CaseCategorizer for StubTools {
    async fn categorize(&self, _text: &str) -> Result<CategoryResult, ToolError> {
        Err(ToolError::Unavailable(
            "case categorization not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl LawRetriever for StubTools {
    async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<Vec<Doc>, ToolError> {
        Err(ToolError::Unavailable(
            "Swiss law retrieval not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl HistoricCaseRetriever for StubTools {
    async fn similar_cases(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<HistoricCase>, ToolError> {
        Err(ToolError::Unavailable(
            "historic cases retrieval not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl TimeEstimator for StubTools {
    async fn estimate_time(&self, _facts: &CaseFacts) -> Result<TimeEstimate, ToolError> {
        Err(ToolError::Unavailable(
            "time estimation not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl CostEstimator for StubTools {
    async fn estimate_cost(&self, _inputs: &CostInputs) -> Result<CostEstimate, ToolError> {
        Err(ToolError::Unavailable(
            "cost estimation not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl UserClarifier for StubTools {
    async fn clarify(
        &self,
        _question: &str,
        _missing_fields: &[String],
    ) -> Result<String, ToolError> {
        Err(ToolError::Unavailable(
            "user interaction not yet implemented".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_tool_reports_unavailable() {
        let tools = StubTools;

        assert!(matches!(
            tools.categorize("any").await,
            Err(ToolError::Unavailable(_))
        ));
        assert!(matches!(
            tools.retrieve("any", 3).await,
            Err(ToolError::Unavailable(_))
        ));
        assert!(matches!(
            tools.similar_cases("any", 3).await,
            Err(ToolError::Unavailable(_))
        ));
        assert!(matches!(
            tools.clarify("any", &[]).await,
            Err(ToolError::Unavailable(_))
        ));
    }
}
