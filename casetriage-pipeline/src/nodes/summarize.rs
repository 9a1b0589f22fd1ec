//! Customer summary node.
//!
//! Optional final step: one LLM call rewrites the aggregate into a short
//! customer-facing answer. Runs after aggregation and outside the tool
//! budget; any backend failure simply leaves `final_answer` empty. The
//! aggregate invariants are never touched here.

use tracing::warn;

use casetriage_agent::CompletionRequest;
use casetriage_policy::PromptBuilder;

use crate::state::AgentOutput;
use crate::trace::{RunTrace, TraceEventKind};

use super::NodeContext;

pub(crate) async fn run(
    mut output: AgentOutput,
    ctx: &NodeContext<'_>,
    trace: &mut RunTrace,
) -> AgentOutput {
    trace.record(TraceEventKind::NodeEntered {
        node: "summarize".to_string(),
    });

    let cost_text = output.estimated_cost.as_ref().map(|c| c.to_string());
    let prompt = PromptBuilder::summary_request(
        output.category,
        output.likelihood_win,
        output.estimated_time.as_deref(),
        cost_text.as_deref(),
        &output.explanation,
    );

    let request = CompletionRequest::user(prompt)
        .with_system(PromptBuilder::system_prompt())
        .with_max_tokens(512)
        .with_temperature(0.7);

    match ctx.backend.complete(request).await {
        Ok(response) => {
            trace.record(TraceEventKind::LlmInvoked {
                purpose: "summary".to_string(),
                ok: true,
            });
            let answer = response.content.trim().to_string();
            if !answer.is_empty() {
                output.final_answer = Some(answer);
            }
        }
        Err(err) => {
            warn!(error = %err, "customer summary failed");
            trace.record(TraceEventKind::LlmInvoked {
                purpose: "summary".to_string(),
                ok: false,
            });
        }
    }

    trace.record(TraceEventKind::NodeCompleted {
        node: "summarize".to_string(),
    });
    output
}
