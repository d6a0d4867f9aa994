//! Completion client for the hosted assistant model.
//!
//! Provides a `CompletionBackend` trait with a Cerebras implementation
//! speaking the OpenAI-compatible chat completions surface. Transport
//! errors, non-2xx statuses, empty choice lists and null content all
//! surface as `CompletionError`; callers treat every variant uniformly as
//! a failed generation. There is no retry here: a failed call is terminal
//! for the request that triggered it, and re-sending is left to the user.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Request timeout for completion calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";

/// Abstraction over reply-generation providers.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Generate one completion for a system instruction plus a single
    /// user message.
    async fn complete(&self, system: &str, user_message: &str)
        -> Result<String, CompletionError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Reply generation errors.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Model returned no completion")]
    EmptyCompletion,

    #[error("Missing API key")]
    MissingApiKey,
}

/// Cerebras completion client configuration.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionConfig {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let api_key = api_key
            .or_else(|| std::env::var("CEREBRAS_API_KEY").ok())
            .unwrap_or_default();

        Self {
            api_key,
            model,
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

// ============================================================================
// Chat completions API structs (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// CerebrasClient
// ============================================================================

/// Chat completions client for the Cerebras inference API.
#[derive(Debug, Clone)]
pub struct CerebrasClient {
    client: Client,
    config: CompletionConfig,
    base_url: String,
}

impl CerebrasClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        Self::with_base_url(config, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for testing / integration).
    pub fn with_base_url(
        config: CompletionConfig,
        base_url: String,
    ) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    async fn complete_once(
        &self,
        system: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&error_body)
                .ok()
                .and_then(|e| e.error)
                .map(|e| e.message)
                .unwrap_or(error_body);

            tracing::error!(code = status.as_u16(), message = %message, "Completion API error");

            return Err(CompletionError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyCompletion)
    }
}

#[async_trait]
impl CompletionBackend for CerebrasClient {
    async fn complete(
        &self,
        system: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        self.complete_once(system, user_message).await
    }

    fn name(&self) -> &str {
        "cerebras"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_key: &str) -> CompletionConfig {
        CompletionConfig {
            api_key: api_key.to_string(),
            model: "llama3.3-70b".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    fn mock_completion_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let mock_server = MockServer::start().await;
        let client = CerebrasClient::with_base_url(test_config("test-key"), mock_server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({
                "model": "llama3.3-70b",
                "messages": [
                    { "role": "system", "content": "be helpful" },
                    { "role": "user", "content": "hello" }
                ],
                "temperature": 0.7,
                "max_tokens": 500
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(mock_completion_response("hi there")),
            )
            .mount(&mock_server)
            .await;

        let reply = client.complete("be helpful", "hello").await;
        assert_eq!(reply.unwrap(), "hi there");
    }

    #[tokio::test]
    async fn test_complete_returns_api_error_on_500() {
        let mock_server = MockServer::start().await;
        let client = CerebrasClient::with_base_url(test_config("test-key"), mock_server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": { "message": "Internal server error" }
            })))
            .mount(&mock_server)
            .await;

        let result = client.complete("sys", "hello").await;
        match result {
            Err(CompletionError::Api { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("Expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_complete_treats_empty_choices_as_failure() {
        let mock_server = MockServer::start().await;
        let client = CerebrasClient::with_base_url(test_config("test-key"), mock_server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let result = client.complete("sys", "hello").await;
        assert!(matches!(result, Err(CompletionError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn test_complete_treats_null_content_as_failure() {
        let mock_server = MockServer::start().await;
        let client = CerebrasClient::with_base_url(test_config("test-key"), mock_server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [ { "message": { "role": "assistant", "content": null } } ]
            })))
            .mount(&mock_server)
            .await;

        let result = client.complete("sys", "hello").await;
        assert!(matches!(result, Err(CompletionError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn test_client_fails_with_missing_api_key() {
        let result = CerebrasClient::new(test_config(""));
        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
    }
}
