//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the ticket pipeline and an
//! external system (the language model and the issue tracker).
//! Implementations live in `src/adapters/`.

pub mod issues;
pub mod llm;

pub use issues::{CreatedIssue, IssueFields, IssueFuture, IssueRequest, IssueTracker};
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
