//! SaveSessionHandler - Command handler for persisting an interview.

use std::sync::Arc;
use tracing::debug;

use crate::domain::capture::{CaptureError, CaptureState, GuidedCapture};
use crate::domain::foundation::SessionId;
use crate::ports::StateStore;

/// Command to save a session's snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SaveSessionCommand<'a> {
    pub session_id: SessionId,
    pub session: &'a GuidedCapture,
}

/// Handler for saving sessions.
pub struct SaveSessionHandler {
    store: Arc<dyn StateStore>,
}

impl SaveSessionHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Snapshots the session and stores it, replacing any previous snapshot.
    ///
    /// Returns the snapshot that was written.
    pub async fn handle(&self, cmd: SaveSessionCommand<'_>) -> Result<CaptureState, CaptureError> {
        let state = cmd.session.get_state();
        self.store.save(cmd.session_id, &state).await?;

        debug!(
            session_id = %cmd.session_id,
            status = %cmd.session.status(),
            "session saved"
        );
        Ok(state)
    }
}
