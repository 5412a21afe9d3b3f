//! Live adapter for the `LlmClient` port using the `OpenAI` chat completions API.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Live LLM client that calls an `OpenAI`-compatible chat completions endpoint.
pub struct LiveLlmClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl LiveLlmClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `https://api.openai.com/v1/`).
    ///
    /// A missing key is reported on the first request rather than here, so
    /// commands that never reach the model still work without one.
    #[must_use]
    pub fn new(api_key: Option<SecretString>, base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), api_key, base_url: base_url.into() }
    }

    fn endpoint(&self) -> String {
        format!("{}chat/completions", self.base_url)
    }
}

/// Request body sent to the chat completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Output format constraint.
#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Top-level response from the chat completions API.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Token usage reported by the API.
#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error response from the API.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self.api_key.as_ref().ok_or_else(|| {
                Box::<dyn std::error::Error + Send + Sync>::from("OPENAI_API_KEY is not set")
            })?;

            let body = ChatRequest {
                model: &request.model,
                messages: vec![
                    ChatMessage { role: "system", content: &request.system },
                    ChatMessage { role: "user", content: &request.prompt },
                ],
                response_format: request
                    .json_response
                    .then_some(ResponseFormat { kind: "json_object" }),
            };

            debug!(model = %request.model, endpoint = %self.endpoint(), "sending completion request");

            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(api_key.expose_secret())
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("OpenAI API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read OpenAI API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("OpenAI API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: ChatResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse OpenAI API response: {e}").into()
                },
            )?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| -> Box<dyn std::error::Error + Send + Sync> {
                    "OpenAI API response contained no message content".into()
                })?;

            let (prompt_tokens, completion_tokens) = api_response
                .usage
                .map_or((0, 0), |u| (u.prompt_tokens, u.completion_tokens));

            debug!(prompt_tokens, completion_tokens, "completion received");

            Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4-turbo".into(),
            system: "You are a scrum master.".into(),
            prompt: "Task Title: Add login".into(),
            json_response: true,
        }
    }

    fn client_for(server: &MockServer) -> LiveLlmClient {
        LiveLlmClient::new(
            Some(SecretString::new("sk-test".into())),
            format!("{}/v1/", server.uri()),
        )
    }

    #[tokio::test]
    async fn sends_system_and_user_messages_in_json_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4-turbo",
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": "You are a scrum master."},
                    {"role": "user", "content": "Task Title: Add login"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).complete(&request()).await.unwrap();
        assert_eq!(response.text, "{\"ok\": true}");
        assert_eq!(response.prompt_tokens, 12);
        assert_eq!(response.completion_tokens, 3);
    }

    #[tokio::test]
    async fn surfaces_upstream_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err().to_string();
        assert!(err.contains("401"), "{err}");
        assert!(err.contains("Incorrect API key provided"), "{err}");
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err().to_string();
        assert!(err.contains("Failed to parse"), "{err}");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let client = LiveLlmClient::new(None, format!("{}/v1/", server.uri()));
        let err = client.complete(&request()).await.unwrap_err().to_string();
        assert!(err.contains("OPENAI_API_KEY"));
    }
}
