//! Degradation behavior: the 'Andere' fast path and runs where every
//! collaborator is down.

use std::sync::Arc;

use casetriage_agent::tools::scripted::ScriptedCategorizer;
use casetriage_agent::{CostEstimate, MockBackend, Toolkit};
use casetriage_policy::{Category, CategoryResult};
use casetriage_pipeline::{CaseAnalyzer, CaseInput, CaseMetadata, TriageConfig};

fn categorizer(category: Category, confidence: f32) -> Toolkit {
    Toolkit::stub().with_categorizer(Arc::new(ScriptedCategorizer::new(CategoryResult::new(
        category, confidence,
    ))))
}

#[tokio::test]
async fn test_andere_skips_analysis_entirely() {
    let backend = Arc::new(MockBackend::default());
    let analyzer = CaseAnalyzer::new(backend.clone(), categorizer(Category::Other, 0.95));

    let output = analyzer
        .run(CaseInput::new("A question about my inheritance"))
        .await
        .unwrap();

    assert_eq!(output.category, Category::Other);
    assert_eq!(output.likelihood_win, None);
    assert_eq!(output.estimated_time, None);
    assert_eq!(output.estimated_cost, None);
    assert!(!output.explanation.is_empty());
    assert!(output
        .explanation
        .contains("analysis tools not applicable for this case type"));
    // Analysis never ran, so the LLM was never consulted.
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_all_collaborators_down_still_degrades_gracefully() {
    // Every tool is a stub and the backend is unreachable: the only thing
    // left is 'Andere' with a caveat - still a valid output.
    let backend = Arc::new(MockBackend::default().with_available(false));
    let analyzer = CaseAnalyzer::new(backend, Toolkit::stub());

    let output = analyzer
        .run(CaseInput::new("My employer fired me without notice"))
        .await
        .unwrap();

    assert_eq!(output.category, Category::Other);
    assert!(output.estimates_consistent());
    assert!(output.explanation.contains("Classification unavailable"));
}

#[tokio::test]
async fn test_dead_backend_with_working_categorizer_uses_baselines() {
    // Categorization works, the LLM does not: likelihood comes from the
    // business-logic baseline, time and cost from the fallback tables.
    let backend = Arc::new(MockBackend::default().with_available(false));
    let analyzer =
        CaseAnalyzer::new(backend, categorizer(Category::EmploymentLaw, 0.9));

    let output = analyzer
        .run(CaseInput::new(
            "I was fired on the spot, a fristlose Kuendigung without any warning",
        ))
        .await
        .unwrap();

    // Summary dismissal carries an 80% baseline.
    assert_eq!(output.likelihood_win, Some(80));
    assert!(output.explanation.contains("Business logic baseline: 80%"));

    // Fallback time table: employment at medium complexity.
    assert_eq!(output.estimated_time.as_deref(), Some("6 months"));

    // Fallback cost is an itemized breakdown that sums to its total.
    match output.estimated_cost.unwrap() {
        CostEstimate::Breakdown { total_chf, breakdown } => {
            let sum: f64 = breakdown.values().sum();
            assert!((total_chf - sum).abs() <= 1.0);
            assert!(breakdown.contains_key("lawyer_fees"));
            assert!(breakdown.contains_key("court_fees"));
            assert!(breakdown.contains_key("vat"));
        }
        other => panic!("expected breakdown, got {other:?}"),
    }
}

#[tokio::test]
async fn test_real_estate_without_baseline_uses_default() {
    let backend = Arc::new(MockBackend::default().with_available(false));
    let analyzer = CaseAnalyzer::new(backend, categorizer(Category::RealEstateLaw, 0.9));

    let output = analyzer
        .run(CaseInput::new("My landlord refuses to return the deposit"))
        .await
        .unwrap();

    assert_eq!(output.likelihood_win, Some(50));
    assert!(output
        .explanation
        .contains("not supported by the business logic estimator"));
    assert!(output.estimates_consistent());
}

#[tokio::test]
async fn test_metadata_travels_to_estimators() {
    let backend = Arc::new(MockBackend::default().with_available(false));
    let analyzer = CaseAnalyzer::new(backend, categorizer(Category::EmploymentLaw, 0.9))
        .with_config(TriageConfig::default());

    let input = CaseInput::new("Termination because of restructuring").with_metadata(
        CaseMetadata {
            language: None,
            preferred_units: None,
            court_level: Some("cantonal".to_string()),
            judges_count: Some(3),
        },
    );

    // The run completes; court level and judge count only shape the facts
    // handed to the (here unavailable) estimators.
    let output = analyzer.run(input).await.unwrap();
    assert!(output.estimates_consistent());
    assert!(output.likelihood_win.is_some());
}
