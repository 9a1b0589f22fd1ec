//! Orchestration pipeline for Swiss legal case triage.
//!
//! Drives a case description through a short, statically known sequence of
//! steps - ingest → categorize → (branch) → win likelihood → time & cost →
//! aggregate - coordinating an LLM backend, retrieval tools, and
//! business-logic estimators under a bounded per-run tool-call budget.
//!
//! # Design
//!
//! - State is passed **by value**: each node consumes a [`CaseState`] and
//!   returns a new one. Nothing is shared between runs; concurrent cases
//!   are independent pipeline invocations.
//! - The single branch (category `Other` skips analysis) is a plain `if`
//!   in [`CaseAnalyzer::run`] - there is no graph engine.
//! - All collaborators are injected at construction: an
//!   [`LlmBackend`](casetriage_agent::LlmBackend) and a
//!   [`Toolkit`](casetriage_agent::Toolkit) of one-method tool traits.
//! - Only invalid input fails a run. Tool outages, budget exhaustion, and
//!   schema repairs degrade to deterministic fallbacks with caveats in the
//!   explanation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use casetriage_agent::{MockBackend, Toolkit};
//! use casetriage_pipeline::{CaseAnalyzer, CaseInput};
//!
//! # async fn example() -> Result<(), casetriage_pipeline::AnalysisError> {
//! let backend = Arc::new(MockBackend::default());
//! let analyzer = CaseAnalyzer::new(backend, Toolkit::stub());
//!
//! let output = analyzer
//!     .run(CaseInput::new("My employer has not paid my salary for months"))
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&output).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod budget;
pub mod config;
pub mod error;
mod nodes;
pub mod state;
pub mod trace;

pub use analyzer::{run_case_analysis, CaseAnalyzer};
pub use budget::{BudgetExhausted, ToolBudget, ToolKind};
pub use config::TriageConfig;
pub use error::AnalysisError;
pub use state::{AgentOutput, CaseInput, CaseMetadata, CaseState, Language};
pub use trace::{RunTrace, TraceEvent, TraceEventKind};
