//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion services (OpenAI, Anthropic, mock)
//! - `storage` - Snapshot stores (files, in-memory)

pub mod ai;
pub mod storage;
