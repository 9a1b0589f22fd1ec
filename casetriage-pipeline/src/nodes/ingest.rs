//! Ingest node: normalize input and initialize the working state.

use tracing::debug;

use casetriage_agent::CaseFacts;
use casetriage_policy::limits;

use crate::budget::ToolBudget;
use crate::config::TriageConfig;
use crate::error::AnalysisError;
use crate::state::{CaseInput, CaseState, Language};
use crate::trace::{RunTrace, TraceEventKind};

/// Normalize the case text and build the initial state: metadata defaults
/// filled, zero tool calls charged, empty explanation list.
///
/// Rejecting empty or whitespace-only text is the pipeline's only hard
/// failure.
pub(crate) fn run(input: CaseInput, config: &TriageConfig) -> Result<CaseState, AnalysisError> {
    let text = normalize(&input.text);
    if text.is_empty() {
        return Err(AnalysisError::Validation(
            "case text must not be empty".to_string(),
        ));
    }

    let metadata = input.metadata.clone().unwrap_or_default();
    let language = metadata.language.unwrap_or_default();
    let preferred_units = metadata.preferred_units.unwrap_or(config.output.default_unit);
    let court_level = metadata
        .court_level
        .clone()
        .unwrap_or_else(|| limits::DEFAULT_COURT_LEVEL.to_string());

    let facts = CaseFacts {
        text: text.clone(),
        jurisdiction: limits::DEFAULT_JURISDICTION.to_string(),
        category: None,
        complexity: Default::default(),
        court_level,
        judges_count: metadata.judges_count,
        appeal_expected: false,
        clarification: None,
    };

    let mut trace = RunTrace::new();
    trace.record(TraceEventKind::NodeEntered {
        node: "ingest".to_string(),
    });
    trace.record(TraceEventKind::NodeCompleted {
        node: "ingest".to_string(),
    });

    debug!(run_id = %trace.run_id(), chars = text.len(), ?language, "case ingested");

    Ok(CaseState {
        input,
        text,
        language,
        preferred_units,
        facts,
        category: None,
        subcategory: None,
        baseline: None,
        likelihood: None,
        time_estimate: None,
        cost_estimate: None,
        explanations: Vec::new(),
        sources: Vec::new(),
        budget: ToolBudget::new(config.budget.clone()),
        trace,
    })
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use casetriage_agent::TimeUnit;
    use crate::state::CaseMetadata;

    #[test]
    fn test_empty_text_rejected() {
        let err = run(CaseInput::new(""), &TriageConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));

        let err = run(CaseInput::new("   \n\t "), &TriageConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let state = run(
            CaseInput::new("  My  employer\n\tterminated   me  "),
            &TriageConfig::default(),
        )
        .unwrap();
        assert_eq!(state.text, "My employer terminated me");
    }

    #[test]
    fn test_metadata_defaults() {
        let state = run(CaseInput::new("some case"), &TriageConfig::default()).unwrap();

        assert_eq!(state.language, Language::De);
        assert_eq!(state.preferred_units, TimeUnit::Months);
        assert_eq!(state.facts.court_level, "district");
        assert_eq!(state.facts.jurisdiction, "CH");
        assert_eq!(state.budget.used(), 0);
        assert!(state.explanations.is_empty());
    }

    #[test]
    fn test_metadata_respected() {
        let input = CaseInput::new("some case").with_metadata(CaseMetadata {
            language: Some(Language::En),
            preferred_units: Some(TimeUnit::Weeks),
            court_level: Some("cantonal".to_string()),
            judges_count: Some(3),
        });
        let state = run(input, &TriageConfig::default()).unwrap();

        assert_eq!(state.language, Language::En);
        assert_eq!(state.preferred_units, TimeUnit::Weeks);
        assert_eq!(state.facts.court_level, "cantonal");
        assert_eq!(state.facts.judges_count, Some(3));
    }
}
