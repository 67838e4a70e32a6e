//! State Store Port - Interface for persisting interview snapshots.
//!
//! Sessions are never persisted directly; only their plain-data
//! `CaptureState` snapshot is, keyed by `SessionId`.

use async_trait::async_trait;

use crate::domain::capture::CaptureState;
use crate::domain::foundation::SessionId;

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("State not found for session: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for saving and loading interview snapshots
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Save a snapshot, replacing any previous one for the session
    async fn save(&self, id: SessionId, state: &CaptureState) -> Result<(), StateStoreError>;

    /// Load a snapshot
    ///
    /// # Errors
    /// Returns `StateStoreError::NotFound` if nothing is stored under `id`
    async fn load(&self, id: SessionId) -> Result<CaptureState, StateStoreError>;

    /// Check if a snapshot exists
    async fn exists(&self, id: SessionId) -> Result<bool, StateStoreError>;

    /// Delete a snapshot; deleting a missing session is not an error
    async fn delete(&self, id: SessionId) -> Result<(), StateStoreError>;

    /// All stored session ids, sorted
    async fn list(&self) -> Result<Vec<SessionId>, StateStoreError>;
}
