//! OpenAI Provider - `CompletionService` over OpenAI's chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! One HTTP request per completion. Failures are classified into `AIError`
//! and returned; nothing is retried here.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, CompletionService, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    /// Model used when a request does not name one.
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        OpenAIRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);
        debug!(
            trace_id = %request.metadata.trace_id,
            purpose = %request.metadata.purpose,
            model = %openai_request.model,
            "sending OpenAI completion request"
        );

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to `AIError`.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "OpenAI request failed");

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(parse_retry_after(&error_body))),
            400 => {
                if error_body.contains("maximum context length")
                    || error_body.contains("context_length_exceeded")
                {
                    Err(AIError::ContextTooLong)
                } else {
                    Err(AIError::InvalidRequest(error_body))
                }
            }
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        completion_from_openai(openai_response)
    }
}

#[async_trait]
impl CompletionService for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gpt-4o") || m.starts_with("gpt-4-turbo") => 128_000,
            m if m.starts_with("gpt-4") => 8_192,
            m if m.starts_with("gpt-3.5") => 16_385,
            _ => 128_000,
        };

        ProviderInfo::new("openai", &self.config.model, max_context)
    }
}

/// Converts a decoded OpenAI response body into our response type.
fn completion_from_openai(response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => {
            return Err(AIError::content_filtered("OpenAI content filter"));
        }
        _ => FinishReason::Stop,
    };

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        usage,
        model: response.model,
        finish_reason,
    })
}

/// Extracts "try again in Ns" from an error body, defaulting to 30s.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let rest = &message[message.find("try again in ")? + "try again in ".len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{RequestMetadata, RequestPurpose};

    fn provider(model: &str) -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key").with_model(model)).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(RequestPurpose::QuestionGeneration))
            .with_system_prompt("sys")
            .with_message(MessageRole::User, "ask me")
            .with_temperature(Some(0.3))
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o-mini")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = OpenAIConfig::new("sk-secret-value");
        assert!(!format!("{:?}", config).contains("sk-secret-value"));
    }

    #[test]
    fn request_puts_system_prompt_first_and_uses_default_model() {
        let body = provider("gpt-4o").to_openai_request(&request());

        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[1].role, "user");
        assert_eq!(body.messages[1].content, "ask me");
        assert_eq!(body.temperature, Some(0.3));
    }

    #[test]
    fn request_model_overrides_config() {
        let body = provider("gpt-4o").to_openai_request(&request().with_model(Some("gpt-4.1")));
        assert_eq!(body.model, "gpt-4.1");
    }

    #[test]
    fn unset_options_are_not_serialized() {
        let req = CompletionRequest::new(RequestMetadata::new(RequestPurpose::Synthesis))
            .with_message(MessageRole::User, "hi");
        let json = serde_json::to_value(provider("gpt-4o").to_openai_request(&req)).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider = OpenAIProvider::new(
            OpenAIConfig::new("k").with_base_url("http://localhost:8080/v1/"),
        )
        .unwrap();
        assert_eq!(
            provider.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn parses_completion_body() {
        let body: OpenAIResponse = serde_json::from_str(
            r#"{
                "model": "gpt-4o-2024-08-06",
                "choices": [{"message": {"role": "assistant", "content": "[\"Q1?\"]"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4}
            }"#,
        )
        .unwrap();

        let completion = completion_from_openai(body).unwrap();

        assert_eq!(completion.content, "[\"Q1?\"]");
        assert_eq!(completion.model, "gpt-4o-2024-08-06");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.usage.total_tokens, 16);
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let body: OpenAIResponse =
            serde_json::from_str(r#"{"model": "gpt-4o", "choices": []}"#).unwrap();
        assert!(matches!(completion_from_openai(body), Err(AIError::Parse(_))));
    }

    #[test]
    fn content_filter_is_reported_as_error() {
        let body: OpenAIResponse = serde_json::from_str(
            r#"{"model": "gpt-4o", "choices": [{"message": {"content": null}, "finish_reason": "content_filter"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            completion_from_openai(body),
            Err(AIError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 20s."}}"#;
        assert_eq!(parse_retry_after(error), 20);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(parse_retry_after(r#"{"error":{"message":"nope"}}"#), 30);
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[test]
    fn provider_info_reports_context_window() {
        assert_eq!(provider("gpt-4o").provider_info().max_context_tokens, 128_000);
        assert_eq!(provider("gpt-4").provider_info().max_context_tokens, 8_192);
        assert_eq!(provider("gpt-4o").provider_info().name, "openai");
    }
}
