//! Per-run tool-call budget.
//!
//! The orchestrator, not any single node, enforces a global ceiling on
//! tool invocations per run, plus per-tool caps. A node asks the budget
//! for a charge before invoking a tool; a refused charge means the node
//! uses its deterministic fallback instead. Exhaustion never aborts a run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BudgetConfig;

/// The kinds of tool invocation the budget distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Categorization,
    Retrieval,
    HistoricCases,
    TimeEstimation,
    CostEstimation,
    Clarification,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categorization => "categorization",
            Self::Retrieval => "retrieval",
            Self::HistoricCases => "historic_cases",
            Self::TimeEstimation => "time_estimation",
            Self::CostEstimation => "cost_estimation",
            Self::Clarification => "clarification",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A charge was refused: either the global ceiling or a per-tool cap is
/// reached. The caller switches to its deterministic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tool budget exhausted for {kind}")]
pub struct BudgetExhausted {
    pub kind: ToolKind,
}

/// Tool-call budget owned by a single run.
#[derive(Debug, Clone)]
pub struct ToolBudget {
    config: BudgetConfig,
    total: u32,
    retrieval: u32,
    historic: u32,
    clarification: u32,
}

impl ToolBudget {
    pub fn new(config: BudgetConfig) -> Self {
        Self {
            config,
            total: 0,
            retrieval: 0,
            historic: 0,
            clarification: 0,
        }
    }

    /// Request one invocation of the given kind. Counts the call if
    /// granted; refuses without counting otherwise.
    pub fn charge(&mut self, kind: ToolKind) -> Result<(), BudgetExhausted> {
        if self.total >= self.config.max_tool_calls {
            return Err(BudgetExhausted { kind });
        }

        let capped = match kind {
            ToolKind::Retrieval => self.retrieval >= self.config.max_retrieval_calls,
            ToolKind::HistoricCases => self.historic >= self.config.max_historic_calls,
            ToolKind::Clarification => self.clarification >= self.config.max_clarification_calls,
            _ => false,
        };
        if capped {
            return Err(BudgetExhausted { kind });
        }

        self.total += 1;
        match kind {
            ToolKind::Retrieval => self.retrieval += 1,
            ToolKind::HistoricCases => self.historic += 1,
            ToolKind::Clarification => self.clarification += 1,
            _ => {}
        }
        Ok(())
    }

    /// Tool calls charged so far.
    pub fn used(&self) -> u32 {
        self.total
    }

    /// Charges left before the global ceiling.
    pub fn remaining(&self) -> u32 {
        self.config.max_tool_calls.saturating_sub(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_ceiling() {
        let mut budget = ToolBudget::new(BudgetConfig {
            max_tool_calls: 2,
            ..BudgetConfig::default()
        });

        assert!(budget.charge(ToolKind::Categorization).is_ok());
        assert!(budget.charge(ToolKind::TimeEstimation).is_ok());
        assert_eq!(
            budget.charge(ToolKind::CostEstimation),
            Err(BudgetExhausted {
                kind: ToolKind::CostEstimation
            })
        );
        assert_eq!(budget.used(), 2);
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_per_tool_caps() {
        let mut budget = ToolBudget::new(BudgetConfig::default());

        assert!(budget.charge(ToolKind::Clarification).is_ok());
        // Cap of one clarification per run
        assert!(budget.charge(ToolKind::Clarification).is_err());
        // Other kinds are still chargeable
        assert!(budget.charge(ToolKind::Retrieval).is_ok());
    }

    #[test]
    fn test_refused_charge_does_not_count() {
        let mut budget = ToolBudget::new(BudgetConfig {
            max_tool_calls: 6,
            max_clarification_calls: 1,
            ..BudgetConfig::default()
        });

        budget.charge(ToolKind::Clarification).unwrap();
        let used = budget.used();
        assert!(budget.charge(ToolKind::Clarification).is_err());
        assert_eq!(budget.used(), used);
    }

    #[test]
    fn test_retrieval_cap_within_ceiling() {
        let mut budget = ToolBudget::new(BudgetConfig::default());

        for _ in 0..3 {
            budget.charge(ToolKind::Retrieval).unwrap();
        }
        assert!(budget.charge(ToolKind::Retrieval).is_err());
    }
}
