//! External tool seams: contracts, stubs, and scripted test doubles.

pub mod scripted;
pub mod stub;
pub mod traits;
pub mod types;

use std::sync::Arc;

pub use traits::{
    CaseCategorizer, CostEstimator, HistoricCaseRetriever, LawRetriever, TimeEstimator,
    ToolError, UserClarifier,
};

/// The full set of tools a pipeline run may invoke, injected at
/// construction time.
#[derive(Clone)]
pub struct Toolkit {
    pub categorizer: Arc<dyn CaseCategorizer>,
    pub law: Arc<dyn LawRetriever>,
    pub historic: Arc<dyn HistoricCaseRetriever>,
    pub time: Arc<dyn TimeEstimator>,
    pub cost: Arc<dyn CostEstimator>,
    pub clarifier: Arc<dyn UserClarifier>,
}

impl Toolkit {
    /// Toolkit where every tool reports unavailable, mirroring the
    /// not-yet-implemented collaborators of the production system. The
    /// pipeline degrades to its deterministic fallbacks on every call.
    pub fn stub() -> Self {
        let tools = Arc::new(stub::StubTools);
        Self {
            categorizer: tools.clone(),
            law: tools.clone(),
            historic: tools.clone(),
            time: tools.clone(),
            cost: tools.clone(),
            clarifier: tools,
        }
    }

    /// Replace the categorizer.
    pub fn with_categorizer(mut self, categorizer: Arc<dyn CaseCategorizer>) -> Self {
        self.categorizer = categorizer;
        self
    }

    /// Replace the statute retriever.
    pub fn with_law(mut self, law: Arc<dyn LawRetriever>) -> Self {
        self.law = law;
        self
    }

    /// Replace the historic-case retriever.
    pub fn with_historic(mut self, historic: Arc<dyn HistoricCaseRetriever>) -> Self {
        self.historic = historic;
        self
    }

    /// Replace the time estimator.
    pub fn with_time(mut self, time: Arc<dyn TimeEstimator>) -> Self {
        self.time = time;
        self
    }

    /// Replace the cost estimator.
    pub fn with_cost(mut self, cost: Arc<dyn CostEstimator>) -> Self {
        self.cost = cost;
        self
    }

    /// Replace the user clarifier.
    pub fn with_clarifier(mut self, clarifier: Arc<dyn UserClarifier>) -> Self {
        self.clarifier = clarifier;
        self
    }
}
