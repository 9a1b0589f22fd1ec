//! Time & cost node.
//!
//! One LLM call assesses complexity, then time and cost are estimated
//! independently: each charges the budget for its tool and degrades to a
//! deterministic fallback when the tool is unavailable or the budget
//! refuses. Neither estimation depends on the other's result beyond the
//! cost inputs carrying the time estimate.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use casetriage_agent::{CompletionRequest, CostEstimate, CostInputs, TimeEstimate};
use casetriage_policy::{fallback_months, Category, Complexity, PromptBuilder};

use crate::budget::ToolKind;
use crate::config::TimeCostConfig;
use crate::state::CaseState;
use crate::trace::{ToolOutcome, TraceEventKind};

use super::NodeContext;

pub(crate) async fn run(mut state: CaseState, ctx: &NodeContext<'_>) -> CaseState {
    state.trace.record(TraceEventKind::NodeEntered {
        node: "time_cost".to_string(),
    });

    let category = state.category().unwrap_or(Category::Other);

    assess_complexity(&mut state, ctx).await;

    // Time estimation.
    let time = estimate_time(&mut state, ctx, category).await;
    state.explain(format!(
        "Estimated duration: {} (complexity {}).",
        time, state.facts.complexity
    ));
    state.time_estimate = Some(time);

    // Cost estimation.
    let cost = estimate_cost(&mut state, ctx, time).await;
    state.explain(format!("Estimated cost: {}.", cost));
    state.cost_estimate = Some(cost);

    state.trace.record(TraceEventKind::NodeCompleted {
        node: "time_cost".to_string(),
    });
    state
}

/// Ask the LLM how demanding the proceedings will be. Unavailability
/// means medium complexity and no expected appeal.
async fn assess_complexity(state: &mut CaseState, ctx: &NodeContext<'_>) {
    let context = format!("Case: {}", state.text);
    let request = CompletionRequest::user(PromptBuilder::complexity_request(&context))
        .with_system(format!(
            "{}\n{}",
            PromptBuilder::system_prompt(),
            PromptBuilder::time_cost_instructions()
        ))
        .with_max_tokens(256)
        .with_temperature(0.2);

    match ctx.backend.complete(request).await {
        Ok(response) => {
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "complexity".to_string(),
                ok: true,
            });
            let assessment = response.content;
            state.facts.complexity = Complexity::from_assessment(&assessment);
            state.facts.appeal_expected = assessment.to_lowercase().contains("appeal");
            debug!(complexity = %state.facts.complexity, "complexity assessed");
        }
        Err(err) => {
            warn!(error = %err, "complexity assessment failed");
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "complexity".to_string(),
                ok: false,
            });
            state.facts.complexity = Complexity::Medium;
            state.explain(
                "Complexity assessment unavailable; assuming medium complexity.".to_string(),
            );
        }
    }
}

async fn estimate_time(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    category: Category,
) -> TimeEstimate {
    let fallback_for = |complexity: Complexity| {
        TimeEstimate::months(fallback_months(category, complexity).max(1))
    };

    if state.budget.charge(ToolKind::TimeEstimation).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::TimeEstimation,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        state.explain("Time estimation tool skipped (tool budget exhausted).".to_string());
        return fallback_for(state.facts.complexity);
    }

    match ctx.tools.time.estimate_time(&state.facts).await {
        Ok(estimate) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::TimeEstimation,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            estimate
        }
        Err(err) => {
            warn!(error = %err, "time estimation failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::TimeEstimation,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            state.trace.record(TraceEventKind::Fallback {
                node: "time_cost".to_string(),
                reason: "time tool unavailable".to_string(),
            });
            fallback_for(state.facts.complexity)
        }
    }
}

async fn estimate_cost(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    time: TimeEstimate,
) -> CostEstimate {
    let config = &ctx.config.time_cost;
    let inputs = CostInputs {
        time_estimate: time,
        judges_count: state.facts.judges_count,
        hourly_rates: BTreeMap::from([
            ("lawyer".to_string(), config.hourly_rate_lawyer),
            ("paralegal".to_string(), config.hourly_rate_paralegal),
        ]),
        filing_fees: None,
        expert_witness_fees: None,
        vat_rate: config.vat_rate,
    };

    if state.budget.charge(ToolKind::CostEstimation).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::CostEstimation,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        state.explain("Cost estimation tool skipped (tool budget exhausted).".to_string());
        return fallback_cost(time, config);
    }

    match ctx.tools.cost.estimate_cost(&inputs).await {
        Ok(estimate) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::CostEstimation,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            estimate
        }
        Err(err) => {
            warn!(error = %err, "cost estimation failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::CostEstimation,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            state.trace.record(TraceEventKind::Fallback {
                node: "time_cost".to_string(),
                reason: "cost tool unavailable".to_string(),
            });
            fallback_cost(time, config)
        }
    }
}

/// Deterministic cost estimate from the time estimate alone: lawyer fees
/// as a share of elapsed working hours, flat court fees, VAT on the
/// subtotal. Components sum to the total by construction.
pub(crate) fn fallback_cost(time: TimeEstimate, config: &TimeCostConfig) -> CostEstimate {
    let working_hours = time.value as f64 * time.unit.hours() / 30.0;
    let lawyer_hours = working_hours * config.lawyer_time_share;
    let lawyer_fees = lawyer_hours * config.hourly_rate_lawyer;
    let court_fees = config.court_fees_chf;
    let subtotal = lawyer_fees + court_fees;
    let vat = subtotal * config.vat_rate;

    CostEstimate::Breakdown {
        total_chf: subtotal + vat,
        breakdown: BTreeMap::from([
            ("lawyer_fees".to_string(), lawyer_fees),
            ("court_fees".to_string(), court_fees),
            ("vat".to_string(), vat),
        ]),
    }
}
