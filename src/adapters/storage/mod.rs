//! Storage Adapters
//!
//! Implementations of the `StateStore` port for persisting interview snapshots.
//!
//! ## Available Adapters
//!
//! - **FileStateStore** - One JSON or YAML file per session on disk
//! - **InMemoryStateStore** - Stores snapshots in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStore, InMemoryStateStore, StateFormat};
//!
//! // Production: file-based storage
//! let store = FileStateStore::new("./sessions", StateFormat::Json);
//!
//! // Testing: in-memory storage
//! let store = InMemoryStateStore::new();
//! ```

mod file_state_store;
mod in_memory_state_store;

pub use file_state_store::{FileStateStore, StateFormat};
pub use in_memory_state_store::InMemoryStateStore;
