//! Pipeline nodes.
//!
//! Five analysis steps plus the optional customer summary. Each node
//! consumes the [`CaseState`](crate::state::CaseState) and returns the
//! next one; the driving function in
//! [`analyzer`](crate::analyzer) decides which nodes run.

pub(crate) mod aggregate;
pub(crate) mod categorize;
pub(crate) mod ingest;
pub(crate) mod summarize;
pub(crate) mod time_cost;
pub(crate) mod win_likelihood;

use casetriage_agent::{LlmBackend, Toolkit};

use crate::config::TriageConfig;

/// Collaborators shared by the nodes of one run.
pub(crate) struct NodeContext<'a> {
    pub backend: &'a dyn LlmBackend,
    pub tools: &'a Toolkit,
    pub config: &'a TriageConfig,
}
