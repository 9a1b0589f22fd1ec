//! Pipeline error taxonomy.
//!
//! Only invalid input is a hard failure visible to the caller. Everything
//! else - unavailable tools, exhausted budgets, schema repairs at
//! aggregation - is handled inside the nodes and surfaces as caveats in
//! the explanation, never as an error.

/// Error returned by a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Malformed or empty case input. The run fails immediately.
    #[error("invalid case input: {0}")]
    Validation(String),
}
