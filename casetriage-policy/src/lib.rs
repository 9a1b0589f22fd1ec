//! Business-logic policy for Swiss legal case triage.
//!
//! Everything in this crate is deterministic and offline: the category and
//! subcategory model, the baseline likelihood tables contributed by the
//! legal business team, the prompt texts for the LLM touchpoints, and the
//! numeric limits (tool budget, confidence threshold, default rates) the
//! pipeline enforces.
//!
//! The crate deliberately has no async surface and no I/O - it is the part
//! of the system that can be unit-tested without any collaborator.

pub mod baseline;
pub mod category;
pub mod limits;
pub mod prompts;
pub mod subcategory;

pub use baseline::{fallback_months, Baseline};
pub use category::{Category, CategoryResult};
pub use limits::Complexity;
pub use prompts::PromptBuilder;
pub use subcategory::{EmploymentClaim, Subcategory, TrafficOffense};
