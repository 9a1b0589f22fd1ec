//! LLM backend implementations.

pub mod apertus;
pub mod mock;
pub mod traits;

pub use apertus::ApertusBackend;
pub use mock::MockBackend;
pub use traits::{CompletionRequest, CompletionResponse, LlmBackend, LlmError};
