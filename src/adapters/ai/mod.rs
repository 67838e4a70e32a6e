//! Completion Service Adapters.
//!
//! Implementations of the `CompletionService` port.
//!
//! ## Available Adapters
//!
//! - `MockCompletionService` - Scriptable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions
//! - `AnthropicProvider` - Anthropic Messages API
//!
//! `completion_service_from_config` picks one from `AiConfig`.

mod anthropic_provider;
mod factory;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, ANTHROPIC_DEFAULT_BASE_URL, ANTHROPIC_DEFAULT_MODEL,
};
pub use factory::completion_service_from_config;
pub use mock_provider::{MockCompletionService, MockError, MockResponse, DEFAULT_MOCK_RESPONSE};
pub use openai_provider::{
    OpenAIConfig, OpenAIProvider, OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL,
};
