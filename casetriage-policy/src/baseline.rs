//! Baseline likelihood tables.
//!
//! Deterministic starting percentages per (category, subcategory),
//! contributed by the legal business team from claim-handling experience.
//! The reasoning step adjusts around these; it never replaces them as the
//! fallback of record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::limits::Complexity;
use crate::subcategory::{EmploymentClaim, Subcategory, TrafficOffense};

/// A baseline win-likelihood percentage: a single point or a range.
///
/// Ranges resolve to their midpoint when a single number is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    Point(u8),
    Range(u8, u8),
}

impl Baseline {
    /// Resolve to a single percentage. Ranges take the integer midpoint.
    pub fn midpoint(&self) -> u8 {
        match *self {
            Self::Point(p) => p,
            Self::Range(low, high) => ((low as u16 + high as u16) / 2) as u8,
        }
    }
}

impl Subcategory {
    /// Baseline win likelihood for this subcategory.
    ///
    /// Every subcategory in the model has an entry; categories without a
    /// subcategory model have no baseline at all.
    pub fn baseline(&self) -> Baseline {
        let baseline = match self {
            Self::Employment(claim) => match claim {
                EmploymentClaim::SalaryOutstanding => Baseline::Point(100),
                EmploymentClaim::DismissalDuringIllness => Baseline::Point(100),
                EmploymentClaim::SummaryDismissal => Baseline::Point(80),
                EmploymentClaim::WorkloadIncrease => Baseline::Point(0),
                EmploymentClaim::TerminationPoorPerformance => Baseline::Point(20),
            },
            Self::Traffic(offense) => match offense {
                TrafficOffense::DrivingUnderInfluence => Baseline::Point(5),
                TrafficOffense::ParkingLotAccident => Baseline::Range(50, 60),
                TrafficOffense::ExpiredParkingFine => Baseline::Point(5),
                TrafficOffense::ModerateSpeeding => Baseline::Range(10, 15),
                TrafficOffense::AlcoholPenaltyOrder => Baseline::Range(20, 30),
            },
        };
        debug!(subcategory = %self, ?baseline, "baseline lookup");
        baseline
    }

    /// Reference duration in months from the claim-handling tables, where
    /// the business team has recorded one.
    pub fn reference_months(&self) -> Option<u32> {
        match self {
            Self::Employment(claim) => Some(match claim {
                EmploymentClaim::SalaryOutstanding => 5,
                EmploymentClaim::DismissalDuringIllness => 3,
                EmploymentClaim::SummaryDismissal => 6,
                EmploymentClaim::WorkloadIncrease => 0,
                EmploymentClaim::TerminationPoorPerformance => 3,
            }),
            Self::Traffic(_) => None,
        }
    }

    /// Reference flat cost in CHF from the claim-handling tables, where
    /// the business team has recorded one.
    pub fn reference_cost_chf(&self) -> Option<f64> {
        match self {
            Self::Employment(claim) => Some(match claim {
                EmploymentClaim::SalaryOutstanding => 5000.0,
                EmploymentClaim::DismissalDuringIllness => 1500.0,
                EmploymentClaim::SummaryDismissal => 2500.0,
                EmploymentClaim::WorkloadIncrease => 0.0,
                EmploymentClaim::TerminationPoorPerformance => 3500.0,
            }),
            Self::Traffic(_) => None,
        }
    }
}

/// Fallback duration in months when no estimation tool is reachable,
/// keyed by category and assessed complexity.
pub fn fallback_months(category: Category, complexity: Complexity) -> u32 {
    match category {
        Category::EmploymentLaw | Category::Other => match complexity {
            Complexity::Low => 3,
            Complexity::Medium => 6,
            Complexity::High => 12,
        },
        Category::RealEstateLaw => match complexity {
            Complexity::Low => 4,
            Complexity::Medium => 8,
            Complexity::High => 15,
        },
        Category::TrafficCriminalLaw => match complexity {
            Complexity::Low => 2,
            Complexity::Medium => 4,
            Complexity::High => 8,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_baseline_is_100() {
        let sub = Subcategory::Employment(EmploymentClaim::SalaryOutstanding);
        assert_eq!(sub.baseline(), Baseline::Point(100));
        assert_eq!(sub.baseline().midpoint(), 100);
    }

    #[test]
    fn test_summary_dismissal_baseline_is_80() {
        let sub = Subcategory::Employment(EmploymentClaim::SummaryDismissal);
        assert_eq!(sub.baseline().midpoint(), 80);
    }

    #[test]
    fn test_generic_termination_baseline_is_20() {
        let sub = Subcategory::Employment(EmploymentClaim::TerminationPoorPerformance);
        assert_eq!(sub.baseline().midpoint(), 20);
    }

    #[test]
    fn test_range_midpoints() {
        assert_eq!(Baseline::Range(10, 15).midpoint(), 12);
        assert_eq!(Baseline::Range(50, 60).midpoint(), 55);
        assert_eq!(Baseline::Range(20, 30).midpoint(), 25);
    }

    #[test]
    fn test_fallback_months_table() {
        assert_eq!(fallback_months(Category::EmploymentLaw, Complexity::Medium), 6);
        assert_eq!(fallback_months(Category::RealEstateLaw, Complexity::High), 15);
        assert_eq!(fallback_months(Category::TrafficCriminalLaw, Complexity::Low), 2);
    }

    #[test]
    fn test_reference_tables_cover_employment_only() {
        let employment = Subcategory::Employment(EmploymentClaim::SummaryDismissal);
        assert_eq!(employment.reference_months(), Some(6));
        assert_eq!(employment.reference_cost_chf(), Some(2500.0));

        let traffic = Subcategory::Traffic(TrafficOffense::ModerateSpeeding);
        assert_eq!(traffic.reference_months(), None);
        assert_eq!(traffic.reference_cost_chf(), None);
    }
}
