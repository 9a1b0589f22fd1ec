//! Aggregate node: validate, repair, and assemble the final output.
//!
//! The invariants enforced here: a category is always present; likelihood,
//! time, and cost are null exactly for `Andere` and present otherwise;
//! likelihood sits in [1, 100]; a cost breakdown sums to its total within
//! tolerance. Violations are repaired and logged, never returned silently
//! and never fatal.

use tracing::warn;

use casetriage_agent::{CostEstimate, TimeEstimate};
use casetriage_policy::{fallback_months, Category, CategoryResult};

use crate::config::TriageConfig;
use crate::state::{AgentOutput, CaseState};
use crate::trace::{RunTrace, TraceEventKind};

use super::time_cost;

/// Fixed sentence for cases outside the supported categories.
pub(crate) const NO_ANALYSIS_SENTENCE: &str =
    "Category 'Andere' - analysis tools not applicable for this case type";

pub(crate) fn run(mut state: CaseState, config: &TriageConfig) -> (AgentOutput, RunTrace) {
    state.trace.record(TraceEventKind::NodeEntered {
        node: "aggregate".to_string(),
    });

    let category_result = state.category.unwrap_or_else(|| {
        warn!("aggregation reached without a category");
        state.trace.record(TraceEventKind::InvariantRepaired {
            detail: "missing category, defaulting to Andere".to_string(),
        });
        CategoryResult::new(Category::Other, 0.0)
    });
    let category = category_result.category;

    let output = if !category.supports_analysis() {
        // Fast path: no estimations for 'Andere'.
        state.explanations.push(NO_ANALYSIS_SENTENCE.to_string());
        AgentOutput {
            category,
            likelihood_win: None,
            estimated_time: None,
            estimated_cost: None,
            explanation: state.explanations.join(" | "),
            source_documents: state.sources.clone(),
            final_answer: None,
        }
    } else {
        let likelihood = match state.likelihood {
            Some(value) => value,
            None => {
                warn!("likelihood missing at aggregation");
                state.trace.record(TraceEventKind::InvariantRepaired {
                    detail: "missing likelihood, using default".to_string(),
                });
                state
                    .explanations
                    .push("Likelihood missing at aggregation; default applied.".to_string());
                config.likelihood.default_likelihood
            }
        }
        .clamp(1, 100);

        let time = state.time_estimate.unwrap_or_else(|| {
            warn!("time estimate missing at aggregation");
            state.trace.record(TraceEventKind::InvariantRepaired {
                detail: "missing time estimate, using fallback table".to_string(),
            });
            TimeEstimate::months(fallback_months(category, state.facts.complexity).max(1))
        });

        let cost = state.cost_estimate.clone().unwrap_or_else(|| {
            warn!("cost estimate missing at aggregation");
            state.trace.record(TraceEventKind::InvariantRepaired {
                detail: "missing cost estimate, using fallback breakdown".to_string(),
            });
            time_cost::fallback_cost(time, &config.time_cost)
        });
        let cost = repair_cost(cost, config, &mut state.trace);

        let explanation = if state.explanations.is_empty() {
            NO_ANALYSIS_SENTENCE.to_string()
        } else {
            state.explanations.join(" | ")
        };

        AgentOutput {
            category,
            likelihood_win: Some(likelihood),
            estimated_time: Some(time.to_string()),
            estimated_cost: Some(cost),
            explanation,
            source_documents: state.sources.clone(),
            final_answer: None,
        }
    };

    state.trace.record(TraceEventKind::NodeCompleted {
        node: "aggregate".to_string(),
    });
    (output, state.trace)
}

/// Enforce the cost invariants: non-negative amounts, and a breakdown
/// whose components sum to the total within tolerance. A mismatched total
/// is recomputed from the components; unusable components drop the
/// breakdown in favor of the bare total.
fn repair_cost(cost: CostEstimate, config: &TriageConfig, trace: &mut RunTrace) -> CostEstimate {
    let tolerance = config.output.cost_sum_tolerance_chf;

    match cost {
        CostEstimate::Total(total) if total < 0.0 => {
            warn!(total, "negative cost total");
            trace.record(TraceEventKind::InvariantRepaired {
                detail: "negative cost total clamped to zero".to_string(),
            });
            CostEstimate::Total(0.0)
        }
        CostEstimate::Total(_) => cost,
        CostEstimate::Breakdown { total_chf, breakdown } => {
            if breakdown.values().any(|v| *v < 0.0) {
                warn!("cost breakdown contains negative components");
                trace.record(TraceEventKind::InvariantRepaired {
                    detail: "negative breakdown components dropped".to_string(),
                });
                return CostEstimate::Total(total_chf.max(0.0));
            }

            let sum: f64 = breakdown.values().sum();
            if (total_chf - sum).abs() > tolerance {
                warn!(total_chf, sum, "cost breakdown does not sum to total");
                trace.record(TraceEventKind::InvariantRepaired {
                    detail: "cost total recomputed from breakdown".to_string(),
                });
                CostEstimate::Breakdown {
                    total_chf: sum,
                    breakdown,
                }
            } else {
                CostEstimate::Breakdown {
                    total_chf,
                    breakdown,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use casetriage_policy::CategoryResult;

    use crate::config::TriageConfig;
    use crate::nodes::ingest;
    use crate::state::CaseInput;

    fn analyzed_state(config: &TriageConfig) -> CaseState {
        let mut state = ingest::run(CaseInput::new("salary is outstanding"), config).unwrap();
        state.category = Some(CategoryResult::new(Category::EmploymentLaw, 0.9));
        state.likelihood = Some(85);
        state.time_estimate = Some(TimeEstimate::months(5));
        state.cost_estimate = Some(CostEstimate::Total(5000.0));
        state.explain("Business logic baseline: 100%.");
        state
    }

    #[test]
    fn test_full_output_assembled() {
        let config = TriageConfig::default();
        let (output, _) = run(analyzed_state(&config), &config);

        assert_eq!(output.category, Category::EmploymentLaw);
        assert_eq!(output.likelihood_win, Some(85));
        assert_eq!(output.estimated_time.as_deref(), Some("5 months"));
        assert_eq!(output.estimated_cost, Some(CostEstimate::Total(5000.0)));
        assert!(output.explanation.contains("baseline"));
        assert!(output.estimates_consistent());
    }

    #[test]
    fn test_andere_gets_fixed_sentence_and_nulls() {
        let config = TriageConfig::default();
        let mut state = ingest::run(CaseInput::new("inheritance question"), &config).unwrap();
        state.category = Some(CategoryResult::new(Category::Other, 0.9));

        let (output, _) = run(state, &config);

        assert_eq!(output.category, Category::Other);
        assert_eq!(output.likelihood_win, None);
        assert_eq!(output.estimated_time, None);
        assert_eq!(output.estimated_cost, None);
        assert!(output.explanation.contains(NO_ANALYSIS_SENTENCE));
        assert!(output.estimates_consistent());
    }

    #[test]
    fn test_out_of_range_likelihood_clamped() {
        let config = TriageConfig::default();
        let mut state = analyzed_state(&config);
        state.likelihood = Some(250);

        let (output, _) = run(state, &config);
        assert_eq!(output.likelihood_win, Some(100));

        let mut state = analyzed_state(&config);
        state.likelihood = Some(0);
        let (output, _) = run(state, &config);
        assert_eq!(output.likelihood_win, Some(1));
    }

    #[test]
    fn test_mismatched_breakdown_total_recomputed() {
        let config = TriageConfig::default();
        let mut state = analyzed_state(&config);
        state.cost_estimate = Some(CostEstimate::Breakdown {
            total_chf: 9999.0,
            breakdown: BTreeMap::from([
                ("lawyer_fees".to_string(), 3000.0),
                ("court_fees".to_string(), 2000.0),
            ]),
        });

        let (output, trace) = run(state, &config);
        let cost = output.estimated_cost.unwrap();

        assert_eq!(cost.total_chf(), 5000.0);
        assert!(trace.events().iter().any(|e| matches!(
            &e.kind,
            TraceEventKind::InvariantRepaired { detail } if detail.contains("recomputed")
        )));
    }

    #[test]
    fn test_negative_components_drop_breakdown() {
        let config = TriageConfig::default();
        let mut state = analyzed_state(&config);
        state.cost_estimate = Some(CostEstimate::Breakdown {
            total_chf: 1000.0,
            breakdown: BTreeMap::from([("refund".to_string(), -500.0)]),
        });

        let (output, _) = run(state, &config);
        assert_eq!(output.estimated_cost, Some(CostEstimate::Total(1000.0)));
    }

    #[test]
    fn test_missing_estimates_repaired_not_fatal() {
        let config = TriageConfig::default();
        let mut state = analyzed_state(&config);
        state.likelihood = None;
        state.time_estimate = None;
        state.cost_estimate = None;

        let (output, trace) = run(state, &config);

        assert!(output.estimates_consistent());
        assert_eq!(output.likelihood_win, Some(50));
        assert!(output.estimated_time.is_some());
        assert!(output.estimated_cost.is_some());
        assert!(trace
            .events()
            .iter()
            .filter(|e| matches!(e.kind, TraceEventKind::InvariantRepaired { .. }))
            .count() >= 3);
    }
}
