//! Per-run trace of node transitions and tool invocations.
//!
//! Provides transparency into what a run actually did: which nodes ran,
//! which tools were invoked or refused, where fallbacks kicked in, and
//! which invariants had to be repaired. The trace is owned by its run and
//! never shared; its ids and timestamps carry no analytical meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::budget::ToolKind;

/// What happened when a node asked for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    /// The tool answered
    Ok,
    /// The tool was invoked but errored or timed out
    Unavailable,
    /// The budget refused the charge; the tool was never invoked
    Refused,
}

/// One entry in a run trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TraceEventKind {
    NodeEntered {
        node: String,
    },
    NodeCompleted {
        node: String,
    },
    ToolInvoked {
        tool: ToolKind,
        outcome: ToolOutcome,
        budget_used: u32,
    },
    LlmInvoked {
        purpose: String,
        ok: bool,
    },
    Fallback {
        node: String,
        reason: String,
    },
    InvariantRepaired {
        detail: String,
    },
}

/// A timestamped trace event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// Trace of a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTrace {
    /// Unique run identifier
    run_id: String,
    /// When the run started
    started_at: DateTime<Utc>,
    /// Events, oldest first
    events: Vec<TraceEvent>,
}

impl RunTrace {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            events: Vec::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record an event.
    pub fn record(&mut self, kind: TraceEventKind) {
        self.events.push(TraceEvent {
            at: Utc::now(),
            kind,
        });
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of tool invocations that actually reached a tool.
    pub fn tool_invocations(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    TraceEventKind::ToolInvoked {
                        outcome: ToolOutcome::Ok | ToolOutcome::Unavailable,
                        ..
                    }
                )
            })
            .count() as u32
    }

    /// Number of fallbacks taken during the run.
    pub fn fallbacks(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceEventKind::Fallback { .. }))
            .count() as u32
    }
}

impl Default for RunTrace {
    fn default() -> Self {
        Self::new()
    }
}
