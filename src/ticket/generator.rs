//! First model pass: expand a title into a raw scope.

use tracing::{debug, warn};

use super::error::TicketError;
use super::prompts;
use super::scope::RawScope;
use super::title::is_valid_title;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Expands a task title into a scope using the language model.
pub struct ScopeGenerator<'a> {
    llm: &'a dyn LlmClient,
    model: &'a str,
}

impl<'a> ScopeGenerator<'a> {
    /// Creates a generator that sends requests for `model` through `llm`.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, model: &'a str) -> Self {
        Self { llm, model }
    }

    /// Builds the completion request for `title`.
    #[must_use]
    pub fn request(&self, title: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.to_string(),
            system: prompts::generation_system(),
            prompt: prompts::generation_prompt(title),
            json_response: true,
        }
    }

    /// Generates the raw scope for `title`.
    ///
    /// The title is re-checked first so an invalid one never reaches the
    /// network. The returned text is not schema-checked here; that is the
    /// evaluation pass's job.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidTitle`] for titles failing the length
    /// check and [`TicketError::Generation`] with the upstream message when
    /// the service call fails.
    pub async fn generate(&self, title: &str) -> Result<RawScope, TicketError> {
        if !is_valid_title(title) {
            return Err(TicketError::InvalidTitle);
        }

        let response = self
            .llm
            .complete(&self.request(title))
            .await
            .map_err(|e| TicketError::Generation(e.to_string()))?;

        let raw = RawScope::new(response.text);
        if !raw.is_json() {
            warn!(title, "generated scope is not valid JSON; passing it to evaluation as-is");
        }
        debug!(
            title,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "scope generated"
        );
        Ok(raw)
    }
}
