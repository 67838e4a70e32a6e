//! ListSessionsHandler - Query handler summarizing saved interviews.

use std::sync::Arc;
use tracing::warn;

use crate::domain::capture::{CaptureError, CaptureStatus};
use crate::domain::foundation::SessionId;
use crate::ports::{StateStore, StateStoreError};

/// One line of the session listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub topic: String,
    /// `None` when the snapshot's flags are inconsistent.
    pub status: Option<CaptureStatus>,
    pub answered: usize,
    pub total: usize,
}

/// Handler for listing sessions.
pub struct ListSessionsHandler {
    store: Arc<dyn StateStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Summaries for every readable snapshot, in session id order.
    ///
    /// Snapshots that fail to decode are skipped with a warning; a failure
    /// to enumerate the store is returned.
    pub async fn handle(&self) -> Result<Vec<SessionSummary>, CaptureError> {
        let ids = self.store.list().await?;
        let mut summaries = Vec::with_capacity(ids.len());

        for id in ids {
            let state = match self.store.load(id).await {
                Ok(state) => state,
                Err(e @ StateStoreError::DeserializationFailed(_)) => {
                    warn!(session_id = %id, error = %e, "skipping unreadable session");
                    continue;
                }
                // Deleted between list and load.
                Err(StateStoreError::NotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            };

            let answered = state.answered_count();

            summaries.push(SessionSummary {
                session_id: id,
                status: CaptureStatus::from_flags(
                    state.questions_generated,
                    state.synthesis_complete,
                ),
                answered,
                total: state.questions.len(),
                topic: state.topic,
            });
        }

        Ok(summaries)
    }
}
