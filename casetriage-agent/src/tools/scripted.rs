//! Scripted tools.
//!
//! Deterministic in-memory implementations with call counters, for tests
//! and demos. Each tool returns exactly what it was configured with, so two
//! runs over the same input produce identical results.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use casetriage_policy::CategoryResult;

use super::traits::*;
use super::types::{CaseFacts, CostEstimate, CostInputs, Doc, HistoricCase, TimeEstimate};

/// Categorizer returning scripted results, one per call.
///
/// The last result repeats once the script is exhausted, so a single-entry
/// script behaves like a fixed categorizer while multi-entry scripts can
/// drive the clarification round.
pub struct ScriptedCategorizer {
    results: Vec<CategoryResult>,
    calls: AtomicU32,
}

impl ScriptedCategorizer {
    pub fn new(result: CategoryResult) -> Self {
        Self::sequence(vec![result])
    }

    pub fn sequence(results: Vec<CategoryResult>) -> Self {
        assert!(!results.is_empty(), "script needs at least one result");
        Self {
            results,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaseCategorizer for ScriptedCategorizer {
    async fn categorize(&self, _text: &str) -> Result<CategoryResult, ToolError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let result = self
            .results
            .get(call)
            .or_else(|| self.results.last())
            .copied()
            .expect("script is non-empty");
        Ok(result)
    }
}

/// Statute retriever returning canned documents, truncated to `top_k`.
pub struct ScriptedLawRetriever {
    docs: Vec<Doc>,
    calls: AtomicU32,
}

impl ScriptedLawRetriever {
    pub fn new(docs: Vec<Doc>) -> Self {
        Self {
            docs,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LawRetriever for ScriptedLawRetriever {
    async fn retrieve(&self, _query: &str, top_k: usize) -> Result<Vec<Doc>, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.docs.iter().take(top_k).cloned().collect())
    }
}

/// Historic-case retriever returning canned cases, truncated to `top_k`.
pub struct ScriptedHistoricCases {
    cases: Vec<HistoricCase>,
    calls: AtomicU32,
}

impl ScriptedHistoricCases {
    pub fn new(cases: Vec<HistoricCase>) -> Self {
        Self {
            cases,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoricCaseRetriever for ScriptedHistoricCases {
    async fn similar_cases(
        &self,
        _query: &str,
        top_k: usize,
    ) -> Result<Vec<HistoricCase>, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.cases.iter().take(top_k).cloned().collect())
    }
}

/// Time estimator returning a fixed estimate.
pub struct ScriptedTimeEstimator {
    estimate: TimeEstimate,
    calls: AtomicU32,
}

impl ScriptedTimeEstimator {
    pub fn new(estimate: TimeEstimate) -> Self {
        Self {
            estimate,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimeEstimator for ScriptedTimeEstimator {
    async fn estimate_time(&self, _facts: &CaseFacts) -> Result<TimeEstimate, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.estimate)
    }
}

/// Cost estimator returning a fixed estimate.
pub struct ScriptedCostEstimator {
    estimate: CostEstimate,
    calls: AtomicU32,
}

impl ScriptedCostEstimator {
    pub fn new(estimate: CostEstimate) -> Self {
        Self {
            estimate,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CostEstimator for ScriptedCostEstimator {
    async fn estimate_cost(&self, _inputs: &CostInputs) -> Result<CostEstimate, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.estimate.clone())
    }
}

/// Clarifier replying with a fixed answer.
pub struct ScriptedClarifier {
    reply: String,
    calls: AtomicU32,
}

impl ScriptedClarifier {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserClarifier for ScriptedClarifier {
    async fn clarify(
        &self,
        _question: &str,
        _missing_fields: &[String],
    ) -> Result<String, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casetriage_policy::Category;

    #[tokio::test]
    async fn test_scripted_categorizer_counts_calls() {
        let categorizer =
            ScriptedCategorizer::new(CategoryResult::new(Category::EmploymentLaw, 0.9));

        let result = categorizer.categorize("text").await.unwrap();
        categorizer.categorize("text").await.unwrap();

        assert_eq!(result.category, Category::EmploymentLaw);
        assert_eq!(categorizer.calls(), 2);
    }

    #[tokio::test]
    async fn test_retriever_respects_top_k() {
        let docs = (0..5)
            .map(|i| Doc {
                id: format!("doc-{i}"),
                title: format!("OR Art. {i}"),
                snippet: "…".to_string(),
                citation: None,
            })
            .collect();
        let retriever = ScriptedLawRetriever::new(docs);

        let hits = retriever.retrieve("termination", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(retriever.calls(), 1);
    }
}
