//! Mock Completion Service for testing.
//!
//! A scriptable implementation of the `CompletionService` port, so tests
//! can drive an interview without calling a real model.
//!
//! # Example
//!
//! ```ignore
//! let service = MockCompletionService::new()
//!     .with_response(r#"["Q1?","Q2?"]"#)
//!     .with_response("Final!");
//!
//! let mut capture = GuidedCapture::new("Topic", "Format", Arc::new(service.clone()))?;
//! capture.generate_questions().await?;
//! assert_eq!(service.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, CompletionService, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Content returned once the scripted responses run out.
pub const DEFAULT_MOCK_RESPONSE: &str = "Mock response";

/// Mock completion service for testing.
///
/// Clones share the response queue and call history.
#[derive(Debug, Clone)]
pub struct MockCompletionService {
    /// Scripted responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A scripted mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockCompletionService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, FinishReason::Stop)
    }

    /// Queues a successful response with an explicit finish reason.
    pub fn with_response_full(
        self,
        content: impl Into<String>,
        finish_reason: FinishReason,
    ) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success {
                content: content.into(),
                finish_reason,
            });
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_RESPONSE.to_string(),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.info.model.clone());
        let prompt_tokens = (request.prompt_text().len() / 4) as u32;
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                finish_reason,
            } => Ok(CompletionResponse {
                usage: TokenUsage::new(prompt_tokens, (content.len() / 4) as u32),
                content,
                model,
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
