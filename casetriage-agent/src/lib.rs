//! Case-triage agent seams.
//!
//! Provides the two boundaries the triage pipeline talks through:
//! - Trait-based LLM backends (Apertus / any OpenAI-compatible endpoint,
//!   plus a configurable mock for tests)
//! - One trait per external tool (categorization, statute retrieval,
//!   historic cases, time/cost estimation, user clarification), bundled
//!   into a [`Toolkit`] that is injected into the pipeline at construction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           CaseAnalyzer                  │
//! │   (casetriage-pipeline, the caller)     │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌─────────────┐
//! │ LlmBackend  │       │  Toolkit    │
//! │ (Apertus /  │       │ (retrieval, │
//! │  Mock)      │       │  estimators)│
//! └─────────────┘       └─────────────┘
//! ```

pub mod backend;
pub mod tools;

// Re-export main types for convenience
pub use backend::traits::{
    CompletionRequest, CompletionResponse, FinishReason, LlmBackend, LlmError, Message,
    MessageRole, Usage,
};
pub use backend::{ApertusBackend, MockBackend};
pub use tools::traits::{
    CaseCategorizer, CostEstimator, HistoricCaseRetriever, LawRetriever, TimeEstimator,
    ToolError, UserClarifier,
};
pub use tools::types::{
    CaseFacts, CaseOutcome, CostEstimate, CostInputs, Doc, HistoricCase, TimeEstimate, TimeUnit,
};
pub use tools::Toolkit;
