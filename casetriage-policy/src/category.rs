//! Legal case categories.
//!
//! The coarse classification a case receives exactly once, immediately
//! after ingest. Everything downstream branches on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse legal-domain classification of a case.
///
/// Serialized snake_case (`"employment_law"`, …); the German labels the
/// customer-facing layers use are available via [`Category::label_de`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Employment contracts, workplace disputes, dismissals, wages
    EmploymentLaw,
    /// Property disputes, rental agreements, real estate transactions
    RealEstateLaw,
    /// Traffic violations, criminal traffic offenses, license issues
    TrafficCriminalLaw,
    /// All other legal matters
    Other,
}

impl Category {
    /// All categories, in classification-prompt order.
    pub const ALL: [Category; 4] = [
        Category::EmploymentLaw,
        Category::RealEstateLaw,
        Category::TrafficCriminalLaw,
        Category::Other,
    ];

    /// snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmploymentLaw => "employment_law",
            Self::RealEstateLaw => "real_estate_law",
            Self::TrafficCriminalLaw => "traffic_criminal_law",
            Self::Other => "other",
        }
    }

    /// German label used by the business side.
    pub fn label_de(&self) -> &'static str {
        match self {
            Self::EmploymentLaw => "Arbeitsrecht",
            Self::RealEstateLaw => "Immobilienrecht",
            Self::TrafficCriminalLaw => "Strafverkehrsrecht",
            Self::Other => "Andere",
        }
    }

    /// Parse a German label, case-insensitively.
    pub fn from_label_de(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label_de().eq_ignore_ascii_case(label))
    }

    /// Whether the analysis branch runs for this category.
    ///
    /// `Other` skips likelihood, time, and cost entirely.
    pub fn supports_analysis(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_de())
    }
}

/// Result of case categorization: a category plus the classifier's
/// confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub confidence: f32,
}

impl CategoryResult {
    /// Create a result, clamping confidence into [0, 1].
    pub fn new(category: Category, confidence: f32) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Whether the confidence clears the given threshold.
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Category::EmploymentLaw).unwrap();
        assert_eq!(json, "\"employment_law\"");

        let back: Category = serde_json::from_str("\"traffic_criminal_law\"").unwrap();
        assert_eq!(back, Category::TrafficCriminalLaw);
    }

    #[test]
    fn test_german_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label_de(category.label_de()), Some(category));
        }
        assert_eq!(Category::from_label_de("arbeitsrecht"), Some(Category::EmploymentLaw));
        assert_eq!(Category::from_label_de("Steuerrecht"), None);
    }

    #[test]
    fn test_confidence_clamped() {
        let result = CategoryResult::new(Category::Other, 1.7);
        assert_eq!(result.confidence, 1.0);

        let result = CategoryResult::new(Category::Other, -0.3);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_only_other_skips_analysis() {
        assert!(!Category::Other.supports_analysis());
        assert!(Category::EmploymentLaw.supports_analysis());
        assert!(Category::RealEstateLaw.supports_analysis());
        assert!(Category::TrafficCriminalLaw.supports_analysis());
    }
}
