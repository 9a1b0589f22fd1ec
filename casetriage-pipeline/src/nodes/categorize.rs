//! Categorize node: classify the case into one of four legal categories.
//!
//! Order of preference: the categorization tool, then - when its confidence
//! is below threshold - one clarification round with the user, then the LLM
//! as classification fallback when the tool is unavailable. Whatever
//! happens, the node always sets a category; the worst case is `Andere`
//! with zero confidence and a caveat.

use tracing::{debug, warn};

use casetriage_agent::CompletionRequest;
use casetriage_policy::{Category, CategoryResult, PromptBuilder};

use crate::budget::ToolKind;
use crate::state::CaseState;
use crate::trace::{ToolOutcome, TraceEventKind};

use super::NodeContext;

pub(crate) async fn run(mut state: CaseState, ctx: &NodeContext<'_>) -> CaseState {
    state.trace.record(TraceEventKind::NodeEntered {
        node: "categorize".to_string(),
    });

    let threshold = ctx.config.categorize.confidence_threshold;

    let result = match tool_classify(&mut state, ctx, None).await {
        Some(first) if first.is_confident(threshold) => first,
        Some(first) => clarification_round(&mut state, ctx, first).await,
        None => llm_classify(&mut state, ctx).await,
    };

    debug!(
        category = %result.category,
        confidence = result.confidence,
        "case categorized"
    );

    state.facts.category = Some(result.category);
    state.explain(format!(
        "Classified as {} (confidence {:.2}).",
        result.category.label_de(),
        result.confidence
    ));
    state.category = Some(result);

    state.trace.record(TraceEventKind::NodeCompleted {
        node: "categorize".to_string(),
    });
    state
}

/// Invoke the categorization tool within budget. `None` means the node
/// has to classify some other way.
async fn tool_classify(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    augmented_text: Option<&str>,
) -> Option<CategoryResult> {
    if state.budget.charge(ToolKind::Categorization).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::Categorization,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        return None;
    }

    let text = augmented_text.unwrap_or(&state.text);
    match ctx.tools.categorizer.categorize(text).await {
        Ok(result) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Categorization,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            Some(result)
        }
        Err(err) => {
            warn!(error = %err, "categorization tool failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Categorization,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            None
        }
    }
}

/// One round of user clarification followed by a single re-classification.
/// Falls back to the original best guess whenever a step is unavailable.
async fn clarification_round(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    first: CategoryResult,
) -> CategoryResult {
    let question = clarification_question(state, ctx, first.confidence).await;

    if state.budget.charge(ToolKind::Clarification).is_err() {
        state.trace.record(TraceEventKind::ToolInvoked {
            tool: ToolKind::Clarification,
            outcome: ToolOutcome::Refused,
            budget_used: state.budget.used(),
        });
        state.explain(format!(
            "Clarification skipped (tool budget exhausted); proceeding with best guess (confidence {:.2}).",
            first.confidence
        ));
        return first;
    }

    let missing_fields = vec!["case_type_clarification".to_string()];
    match ctx.tools.clarifier.clarify(&question, &missing_fields).await {
        Ok(answer) => {
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Clarification,
                outcome: ToolOutcome::Ok,
                budget_used: state.budget.used(),
            });
            state.facts.clarification = Some(answer.clone());

            let augmented = format!("{}\n\nAdditional clarification: {}", state.text, answer);
            match tool_classify(state, ctx, Some(&augmented)).await {
                Some(second) => second,
                None => {
                    state.explain(
                        "Re-classification after clarification unavailable; keeping initial guess."
                            .to_string(),
                    );
                    first
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "clarification callback failed");
            state.trace.record(TraceEventKind::ToolInvoked {
                tool: ToolKind::Clarification,
                outcome: ToolOutcome::Unavailable,
                budget_used: state.budget.used(),
            });
            state.explain(format!(
                "User clarification unavailable; proceeding with best guess (confidence {:.2}).",
                first.confidence
            ));
            first
        }
    }
}

/// Ask the LLM to phrase the clarification question; fall back to the
/// fixed question when it cannot.
async fn clarification_question(
    state: &mut CaseState,
    ctx: &NodeContext<'_>,
    confidence: f32,
) -> String {
    let request = CompletionRequest::user(PromptBuilder::clarification_question_request(
        &state.text,
        confidence,
    ))
    .with_system(PromptBuilder::system_prompt())
    .with_max_tokens(128)
    .with_temperature(0.2);

    match ctx.backend.complete(request).await {
        Ok(response) => {
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "clarification_question".to_string(),
                ok: true,
            });
            response.content.trim().to_string()
        }
        Err(err) => {
            warn!(error = %err, "could not phrase clarification question");
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "clarification_question".to_string(),
                ok: false,
            });
            PromptBuilder::default_clarification_question().to_string()
        }
    }
}

/// Classification fallback when the tool is unavailable: ask the LLM and
/// match a category label in its reply.
async fn llm_classify(state: &mut CaseState, ctx: &NodeContext<'_>) -> CategoryResult {
    let request = CompletionRequest::user(format!("Categorize this case: {}", state.text))
        .with_system(format!(
            "{}\n{}",
            PromptBuilder::system_prompt(),
            PromptBuilder::categorize_instructions()
        ))
        .with_max_tokens(64)
        .with_temperature(0.0);

    match ctx.backend.complete(request).await {
        Ok(response) => {
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "categorize".to_string(),
                ok: true,
            });
            let content = response.content.to_lowercase();
            let category = Category::ALL
                .into_iter()
                .find(|c| content.contains(&c.label_de().to_lowercase()))
                .unwrap_or(Category::Other);
            CategoryResult::new(category, ctx.config.categorize.llm_fallback_confidence)
        }
        Err(err) => {
            warn!(error = %err, "LLM classification fallback failed");
            state.trace.record(TraceEventKind::LlmInvoked {
                purpose: "categorize".to_string(),
                ok: false,
            });
            state.explain(
                "Classification unavailable; treating the case as 'Andere'.".to_string(),
            );
            CategoryResult::new(Category::Other, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use casetriage_agent::tools::scripted::{ScriptedCategorizer, ScriptedClarifier};
    use casetriage_agent::{MockBackend, Toolkit};

    use crate::config::TriageConfig;
    use crate::nodes::ingest;
    use crate::state::CaseInput;

    fn context<'a>(
        backend: &'a MockBackend,
        tools: &'a Toolkit,
        config: &'a TriageConfig,
    ) -> NodeContext<'a> {
        NodeContext {
            backend,
            tools,
            config,
        }
    }

    fn fresh_state(config: &TriageConfig) -> CaseState {
        ingest::run(CaseInput::new("My employer terminated my contract"), config).unwrap()
    }

    #[tokio::test]
    async fn test_confident_tool_result_taken_directly() {
        let config = TriageConfig::default();
        let categorizer = Arc::new(ScriptedCategorizer::new(CategoryResult::new(
            Category::EmploymentLaw,
            0.95,
        )));
        let tools = Toolkit::stub().with_categorizer(categorizer.clone());
        let backend = MockBackend::default();

        let state = run(fresh_state(&config), &context(&backend, &tools, &config)).await;

        assert_eq!(state.category(), Some(Category::EmploymentLaw));
        assert_eq!(categorizer.calls(), 1);
        // No LLM involvement needed
        assert_eq!(backend.call_count(), 0);
        assert_eq!(state.budget.used(), 1);
    }

    #[tokio::test]
    async fn test_low_confidence_triggers_clarification() {
        let config = TriageConfig::default();
        let categorizer = Arc::new(ScriptedCategorizer::sequence(vec![
            CategoryResult::new(Category::Other, 0.4),
            CategoryResult::new(Category::RealEstateLaw, 0.9),
        ]));
        let clarifier = Arc::new(ScriptedClarifier::new("It is about my rental apartment"));
        let tools = Toolkit::stub()
            .with_categorizer(categorizer.clone())
            .with_clarifier(clarifier.clone());
        let backend = MockBackend::default().with_response("Is your case about a rental?");

        let state = run(fresh_state(&config), &context(&backend, &tools, &config)).await;

        assert_eq!(state.category(), Some(Category::RealEstateLaw));
        assert_eq!(clarifier.calls(), 1);
        assert_eq!(categorizer.calls(), 2);
        assert_eq!(state.facts.clarification.as_deref(), Some("It is about my rental apartment"));
        // categorize + clarify + re-categorize
        assert_eq!(state.budget.used(), 3);
    }

    #[tokio::test]
    async fn test_clarifier_unavailable_keeps_best_guess() {
        let config = TriageConfig::default();
        let categorizer = Arc::new(ScriptedCategorizer::new(CategoryResult::new(
            Category::TrafficCriminalLaw,
            0.5,
        )));
        let tools = Toolkit::stub().with_categorizer(categorizer);
        let backend = MockBackend::default();

        let state = run(fresh_state(&config), &context(&backend, &tools, &config)).await;

        assert_eq!(state.category(), Some(Category::TrafficCriminalLaw));
        assert!(state
            .explanations
            .iter()
            .any(|e| e.contains("clarification unavailable")));
    }

    #[tokio::test]
    async fn test_llm_fallback_when_tool_unavailable() {
        let config = TriageConfig::default();
        let tools = Toolkit::stub();
        let backend = MockBackend::default().with_response("This is clearly Arbeitsrecht.");

        let state = run(fresh_state(&config), &context(&backend, &tools, &config)).await;

        let result = state.category.unwrap();
        assert_eq!(result.category, Category::EmploymentLaw);
        assert_eq!(result.confidence, 0.8);
    }

    #[tokio::test]
    async fn test_everything_down_defaults_to_andere() {
        let config = TriageConfig::default();
        let tools = Toolkit::stub();
        let backend = MockBackend::default().with_available(false);

        let state = run(fresh_state(&config), &context(&backend, &tools, &config)).await;

        let result = state.category.unwrap();
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.confidence, 0.0);
        assert!(state.explanations.iter().any(|e| e.contains("Andere")));
    }
}
