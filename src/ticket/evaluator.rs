//! Second model pass: judge a generated scope.

use tracing::debug;

use super::error::TicketError;
use super::prompts;
use super::scope::{RawScope, ScopedTask};
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Asks the language model for a verdict on a generated scope.
///
/// Runs as a separate call with its own, stricter instruction so the
/// verdict is not produced by the same request that wrote the scope.
pub struct ScopeEvaluator<'a> {
    llm: &'a dyn LlmClient,
    model: &'a str,
}

impl<'a> ScopeEvaluator<'a> {
    /// Creates an evaluator that sends requests for `model` through `llm`.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, model: &'a str) -> Self {
        Self { llm, model }
    }

    /// Builds the completion request judging `raw` for `title`.
    #[must_use]
    pub fn request(&self, title: &str, raw: &RawScope) -> CompletionRequest {
        CompletionRequest {
            model: self.model.to_string(),
            system: prompts::evaluation_system(),
            prompt: prompts::evaluation_prompt(title, raw.as_str()),
            json_response: true,
        }
    }

    /// Evaluates `raw` and returns the structured, judged task.
    ///
    /// The verdict is taken from the model as-is. When the response omits
    /// the title, `title` is used.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Evaluation`] when the service call fails or the
    /// response cannot be parsed into a [`ScopedTask`].
    pub async fn evaluate(&self, title: &str, raw: &RawScope) -> Result<ScopedTask, TicketError> {
        let response = self
            .llm
            .complete(&self.request(title, raw))
            .await
            .map_err(|e| TicketError::Evaluation(e.to_string()))?;

        let mut task: ScopedTask = serde_json::from_str(&response.text).map_err(|e| {
            TicketError::Evaluation(format!("response is not a valid scoped task: {e}"))
        })?;

        if task.title.trim().is_empty() {
            task.title = title.to_string();
        }

        debug!(title, quality = %task.quality, fields = task.scope.len(), "scope evaluated");
        Ok(task)
    }
}
