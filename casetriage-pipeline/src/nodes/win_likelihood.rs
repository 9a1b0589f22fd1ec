//! Win-likelihood node.
//!
//! Step 1 is deterministic: detect the subcategory and look up the
//! business-logic baseline. Step 2 gathers statutes and historic cases
//! within the tool budget, then asks the LLM for an adjusted score in
//! [1, 100]. Any failure falls back to the baseline midpoint (or the
//! configured default when no baseline exists); when the category is not
//! `Andere` this node always leaves a likelihood behind.

use tracing::{debug, warn};

use casetriage_agent::CompletionRequest;
use casetriage_policy::{PromptBuilder, Subcategory};

use crate::budget::ToolKind;
use crate::state::CaseState;
use crate::trace::{ToolOutcome, TraceEventKind};

use super::NodeContext;

pub(crate) async fn run(mut state: CaseState, ctx: &NodeContext<'_>) -> CaseState {
    state.trace.record(TraceEventKind::NodeEntered {
        node: "win_likelihood".to_string(),
    });

    let Some(category) = state.category() else {
        // The driving function only routes categorized cases here.
        warn!("win-likelihood reached without a category; skipping");
        state.trace.record(TraceEventKind::NodeCompleted {
            node: "win_likelihood".to_string(),
        });
        return state;
    };

    // Step 1: deterministic baseline from the business-logic tables.
    state.subcategory = Subcategory::detect(category, &state.text);
    state.baseline = state.subcategory.map(|s| s.baseline());

    let mut context_parts = vec![
        format!("Case Category: {}", category.label_de()),
        format!("Case Description: {}", state.text),
    ];

    match (state.subcategory, state.baseline) {
        (Some(subcategory), Some(baseline)) => {
            state.explain(format!(
                "Business logic baseline: {}% ({}/{}).",
                baseline.midpoint(),
                category.as_str(),
                subcategory
            ));
            context_parts.push(format!(
                "Business-logic baseline likelihood: {}%",
                baseline.midpoint()
            ));
        }
        _ => {
            state.explain(format!(
                "Category '{}' not supported by the business logic estimator; using general analysis.",
                category.label_de()
            ));
        }
    }

    // Step 2: bounded evidence gathering.
    gather_statutes(&mut state, ctx, &mut context_parts).await;
    gather_historic_cases(&mut state, ctx, &mut context_parts).await;

    // Step 3: reasoning adjustment, guided by - but not bound to - the
    // baseline.
    let context = context_parts.join("\n\n");
    let request = CompletionRequest::user(PromptBuilder::win_likelihood_request(&context))
        .with_system(format!(
            "{}\n{}",
            PromptBuilder::system_prompt(),
            PromptBuilder::win_likelihood_instructions()
        ))
        .with_max_tokens(512)
        .with_temperature(0.2);

    let adjusted = match ctx.backend.complete(request).await {
        Ok(response) => {
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "win_likelihood".to_string(),
                ok: true,
            });
            parse_score(&response.content)
        }
        Err(err) => {
            warn!(error = %err, "likelihood reasoning failed");
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "win_likelihood".to_string(),
                ok: false,
            });
            None
        }
    };

    let likelihood = match adjusted {
        Some(score) => {
            state.explain(format!("Reasoning adjusted likelihood to {}%.", score));
            score
        }
        None => {
            let fallback = state
                .baseline
                .map(|b| b.midpoint())
                .unwrap_or(ctx.config.likelihood.default_likelihood);
            state.trace.record(TraceEventKind::Fallback {
                node: "win_likelihood".to_string(),
                reason: "reasoning unavailable, using baseline".to_string(),
            });
            state.explain(format!(
                "Likelihood reasoning unavailable; falling back to {}%.",
                fallback
            ));
            fallback
        }
    };

    let likelihood = likelihood.clamp(1, 100);
    debug!(likelihood, "win likelihood determined");
    state.likelihood = Some(likelihood);

    state.trace.record(TraceEventKind::NodeCompleted {
        node: "win_likelihood".to_string(),
    });
    state
}

async fn gather_statutes(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    context_parts: &mut Vec<String>,
) {
    let Some(category) = state.category() else {
        return;
    };

    if state.budget.charge(ToolKind::Retrieval).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::Retrieval,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        state.explain("Statute retrieval skipped (tool budget exhausted).".to_string());
        return;
    }

    let query = format!("{} legal requirements case analysis", category.label_de());
    match ctx
        .tools
        .law
        .retrieve(&query, ctx.config.likelihood.retrieval_top_k)
        .await
    {
        Ok(docs) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Retrieval,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            if docs.is_empty() {
                context_parts.push("Relevant Swiss Law: none found".to_string());
            } else {
                let lines = docs
                    .iter()
                    .take(2)
                    .map(|d| format!("- {}: {}", d.title, d.snippet))
                    .collect::<Vec<_>>()
                    .join("\n");
                context_parts.push(format!("Relevant Swiss Law:\n{}", lines));
                state.explain(format!("Consulted {} statute passages.", docs.len()));
                state.sources.extend(docs);
            }
        }
        Err(err) => {
            warn!(error = %err, "statute retrieval failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Retrieval,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            context_parts.push("Swiss law documents: not available".to_string());
        }
    }
}

async fn gather_historic_cases(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    context_parts: &mut Vec<String>,
) {
    let Some(category) = state.category() else {
        return;
    };

    if state.budget.charge(ToolKind::HistoricCases).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::HistoricCases,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        state.explain("Historic case lookup skipped (tool budget exhausted).".to_string());
        return;
    }

    let query = format!("{} similar case outcomes", category.label_de());
    match ctx
        .tools
        .historic
        .similar_cases(&query, ctx.config.likelihood.historic_top_k)
        .await
    {
        Ok(cases) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::HistoricCases,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            if cases.is_empty() {
                context_parts.push("Similar Historic Cases: none found".to_string());
            } else {
                let lines = cases
                    .iter()
                    .take(2)
                    .map(|c| {
                        format!(
                            "- {} {}: {} -> {}",
                            c.year,
                            c.court,
                            c.summary,
                            c.outcome.as_str()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                context_parts.push(format!("Similar Historic Cases:\n{}", lines));
                state.explain(format!("Compared {} similar historic cases.", cases.len()));
            }
        }
        Err(err) => {
            warn!(error = %err, "historic case lookup failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::HistoricCases,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            context_parts.push("Historic cases: not available".to_string());
        }
    }
}

/// First whole number in [1, 100] found in the reply.
fn parse_score(content: &str) -> Option<u8> {
    let mut current: u32 = 0;
    let mut in_number = false;

    for ch in content.chars().chain(std::iter::once('\0')) {
        if let Some(digit) = ch.to_digit(10) {
            in_number = true;
            current = current.saturating_mul(10) + digit;
        } else {
            if in_number && (1..=100).contains(&current) {
                return Some(current as u8);
            }
            in_number = false;
            current = 0;
        }
    }
    None
}
