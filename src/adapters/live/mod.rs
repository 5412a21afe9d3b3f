//! Live adapters for real external interactions.

pub mod issues;
pub mod llm;

pub use issues::LiveIssueTracker;
pub use llm::LiveLlmClient;
