//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the interview domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionService` - prompt in, text out (OpenAI, Anthropic, mock)
//! - `StateStore` - durable storage of interview snapshots

mod completion_service;
mod state_store;

pub use completion_service::{
    AIError, CompletionRequest, CompletionResponse, CompletionService, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, TokenUsage,
};
pub use state_store::{StateStore, StateStoreError};
