//! Subcategory detection from case text.
//!
//! The baseline tables are keyed by a finer-grained classification than the
//! four top-level categories. Detection is plain keyword matching over the
//! lowercased case text, with a fixed first-match precedence - a text that
//! matches several rules gets the earliest one. The order is part of the
//! policy: most specific claim kinds first, the generic default last.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;

/// Employment-law claim kinds the business logic has baselines for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentClaim {
    /// Outstanding salary payments
    SalaryOutstanding,
    /// Dismissal during illness or after an accident
    DismissalDuringIllness,
    /// Summary ("fristlose") dismissal
    SummaryDismissal,
    /// Unilateral increase in workload
    WorkloadIncrease,
    /// Ordinary termination citing poor performance
    TerminationPoorPerformance,
}

/// Traffic-criminal-law offense kinds the business logic has baselines for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficOffense {
    /// Driving under the influence with license withdrawal
    DrivingUnderInfluence,
    /// Parking-lot accident without witnesses
    ParkingLotAccident,
    /// Parking fine for an expired ticket
    ExpiredParkingFine,
    /// Moderate speeding outside built-up areas
    ModerateSpeeding,
    /// 0.6 permille alcohol penalty order
    AlcoholPenaltyOrder,
}

/// A detected subcategory, scoped to its parent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    Employment(EmploymentClaim),
    Traffic(TrafficOffense),
}

impl Subcategory {
    /// Detect the subcategory for a case text.
    ///
    /// Returns `None` for categories without a subcategory model
    /// (real estate, other). For supported categories this always returns
    /// a value; texts matching no rule fall through to the category's
    /// generic default.
    pub fn detect(category: Category, case_text: &str) -> Option<Self> {
        let text = case_text.to_lowercase();
        match category {
            Category::EmploymentLaw => Some(Self::Employment(detect_employment(&text))),
            Category::TrafficCriminalLaw => Some(Self::Traffic(detect_traffic(&text))),
            Category::RealEstateLaw | Category::Other => None,
        }
    }

    /// snake_case identifier of the inner claim/offense kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment(EmploymentClaim::SalaryOutstanding) => "salary_outstanding",
            Self::Employment(EmploymentClaim::DismissalDuringIllness) => "dismissal_during_illness",
            Self::Employment(EmploymentClaim::SummaryDismissal) => "summary_dismissal",
            Self::Employment(EmploymentClaim::WorkloadIncrease) => "workload_increase",
            Self::Employment(EmploymentClaim::TerminationPoorPerformance) => {
                "termination_poor_performance"
            }
            Self::Traffic(TrafficOffense::DrivingUnderInfluence) => "driving_under_influence",
            Self::Traffic(TrafficOffense::ParkingLotAccident) => "parking_lot_accident",
            Self::Traffic(TrafficOffense::ExpiredParkingFine) => "expired_parking_fine",
            Self::Traffic(TrafficOffense::ModerateSpeeding) => "moderate_speeding",
            Self::Traffic(TrafficOffense::AlcoholPenaltyOrder) => "alcohol_penalty_order",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

// Precedence: salary → illness → summary dismissal → workload → default.
fn detect_employment(text: &str) -> EmploymentClaim {
    if contains_any(text, &["salary", "wage", "pay", "lohn"]) {
        EmploymentClaim::SalaryOutstanding
    } else if contains_any(text, &["illness", "sick", "krankheit", "unfall"]) {
        EmploymentClaim::DismissalDuringIllness
    } else if contains_any(text, &["dismissal", "fired", "fristlos"]) {
        EmploymentClaim::SummaryDismissal
    } else if contains_any(text, &["workload", "overtime", "work hours"]) {
        EmploymentClaim::WorkloadIncrease
    } else {
        EmploymentClaim::TerminationPoorPerformance
    }
}

// Precedence: alcohol → parking (accident vs. fine) → speeding → penalty
// order → default.
fn detect_traffic(text: &str) -> TrafficOffense {
    if contains_any(text, &["alcohol", "drunk", "dui"]) {
        TrafficOffense::DrivingUnderInfluence
    } else if contains_any(text, &["parking", "parked"]) {
        if text.contains("accident") {
            TrafficOffense::ParkingLotAccident
        } else {
            TrafficOffense::ExpiredParkingFine
        }
    } else if contains_any(text, &["speeding", "speed", "fast"]) {
        TrafficOffense::ModerateSpeeding
    } else if contains_any(text, &["penalty", "fine"]) {
        TrafficOffense::AlcoholPenaltyOrder
    } else {
        TrafficOffense::ModerateSpeeding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_keywords_win() {
        let sub = Subcategory::detect(
            Category::EmploymentLaw,
            "My employer has not paid my salary for three months",
        );
        assert_eq!(
            sub,
            Some(Subcategory::Employment(EmploymentClaim::SalaryOutstanding))
        );
    }

    #[test]
    fn test_salary_precedes_dismissal() {
        // Matches both the salary and the dismissal rules; salary is earlier.
        let sub = Subcategory::detect(
            Category::EmploymentLaw,
            "After my dismissal the outstanding Lohn was never paid",
        );
        assert_eq!(
            sub,
            Some(Subcategory::Employment(EmploymentClaim::SalaryOutstanding))
        );
    }

    #[test]
    fn test_summary_dismissal() {
        let sub = Subcategory::detect(
            Category::EmploymentLaw,
            "I was fired on the spot without notice",
        );
        assert_eq!(
            sub,
            Some(Subcategory::Employment(EmploymentClaim::SummaryDismissal))
        );
    }

    #[test]
    fn test_generic_termination_default() {
        let sub = Subcategory::detect(
            Category::EmploymentLaw,
            "My contract was terminated citing performance reasons",
        );
        assert_eq!(
            sub,
            Some(Subcategory::Employment(
                EmploymentClaim::TerminationPoorPerformance
            ))
        );
    }

    #[test]
    fn test_parking_accident_vs_fine() {
        let accident = Subcategory::detect(
            Category::TrafficCriminalLaw,
            "There was an accident in the parking lot, no witnesses",
        );
        assert_eq!(
            accident,
            Some(Subcategory::Traffic(TrafficOffense::ParkingLotAccident))
        );

        let fine = Subcategory::detect(
            Category::TrafficCriminalLaw,
            "My parking ticket expired by five minutes",
        );
        assert_eq!(
            fine,
            Some(Subcategory::Traffic(TrafficOffense::ExpiredParkingFine))
        );
    }

    #[test]
    fn test_alcohol_precedes_speeding() {
        let sub = Subcategory::detect(
            Category::TrafficCriminalLaw,
            "I was caught speeding after drinking alcohol",
        );
        assert_eq!(
            sub,
            Some(Subcategory::Traffic(TrafficOffense::DrivingUnderInfluence))
        );
    }

    #[test]
    fn test_unsupported_categories() {
        assert_eq!(Subcategory::detect(Category::RealEstateLaw, "rent dispute"), None);
        assert_eq!(Subcategory::detect(Category::Other, "inheritance"), None);
    }
}
