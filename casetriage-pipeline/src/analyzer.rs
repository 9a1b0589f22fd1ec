//! CaseAnalyzer - the driving function of the triage pipeline.
//!
//! Owns the injected collaborators and runs the node sequence:
//! ingest → categorize → (branch) → win likelihood → time & cost →
//! aggregate → optional customer summary. The branch on `Andere` is the
//! only conditional in the flow and is evaluated exactly once.

use std::sync::Arc;

use tracing::{debug, info};

use casetriage_agent::{LlmBackend, Toolkit};

use crate::config::TriageConfig;
use crate::error::AnalysisError;
use crate::nodes::{self, NodeContext};
use crate::state::{AgentOutput, CaseInput, CaseMetadata};
use crate::trace::RunTrace;

/// Entry point for case analysis.
///
/// One analyzer can serve many cases; each [`run`](Self::run) owns its
/// state and budget, so concurrent runs share nothing.
pub struct CaseAnalyzer {
    backend: Arc<dyn LlmBackend>,
    tools: Toolkit,
    config: TriageConfig,
}

impl CaseAnalyzer {
    /// Create an analyzer with the given backend and tools.
    pub fn new(backend: Arc<dyn LlmBackend>, tools: Toolkit) -> Self {
        Self {
            backend,
            tools,
            config: TriageConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TriageConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Analyze a case and return the final output.
    pub async fn run(&self, input: CaseInput) -> Result<AgentOutput, AnalysisError> {
        self.run_traced(input).await.map(|(output, _)| output)
    }

    /// Analyze a case, returning the output together with the run trace.
    pub async fn run_traced(
        &self,
        input: CaseInput,
    ) -> Result<(AgentOutput, RunTrace), AnalysisError> {
        let ctx = NodeContext {
            backend: self.backend.as_ref(),
            tools: &self.tools,
            config: &self.config,
        };

        let state = nodes::ingest::run(input, &self.config)?;
        info!(run_id = %state.trace.run_id(), "case analysis started");

        let state = nodes::categorize::run(state, &ctx).await;

        // The single branch: 'Andere' skips the analysis entirely.
        let state = if state.category().is_some_and(|c| c.supports_analysis()) {
            let state = nodes::win_likelihood::run(state, &ctx).await;
            nodes::time_cost::run(state, &ctx).await
        } else {
            debug!("category outside supported set, skipping analysis");
            state
        };

        let (output, mut trace) = nodes::aggregate::run(state, &self.config);

        let output = if self.config.output.customer_summary {
            nodes::summarize::run(output, &ctx, &mut trace).await
        } else {
            output
        };

        info!(
            run_id = %trace.run_id(),
            category = %output.category,
            tool_calls = trace.tool_invocations(),
            "case analysis finished"
        );
        Ok((output, trace))
    }
}

/// Analyze a single case with the given collaborators.
///
/// Convenience wrapper around [`CaseAnalyzer`] for one-shot callers.
pub async fn run_case_analysis(
    backend: Arc<dyn LlmBackend>,
    tools: Toolkit,
    case_text: impl Into<String>,
    metadata: Option<CaseMetadata>,
) -> Result<AgentOutput, AnalysisError> {
    let mut input = CaseInput::new(case_text);
    if let Some(metadata) = metadata {
        input = input.with_metadata(metadata);
    }
    CaseAnalyzer::new(backend, tools).run(input).await
}
