//! ResumeSessionHandler - Rebuilds a saved interview.

use std::sync::Arc;
use tracing::debug;

use crate::domain::capture::{CaptureError, CaptureOptions, GuidedCapture};
use crate::domain::foundation::SessionId;
use crate::ports::{CompletionService, StateStore};

/// Command to resume a saved session.
#[derive(Debug, Clone, Copy)]
pub struct ResumeSessionCommand {
    pub session_id: SessionId,
}

/// Handler for resuming sessions.
///
/// Snapshots carry no completion service or model settings, so the handler
/// re-attaches its own.
pub struct ResumeSessionHandler {
    store: Arc<dyn StateStore>,
    service: Arc<dyn CompletionService>,
    options: CaptureOptions,
}

impl ResumeSessionHandler {
    pub fn new(store: Arc<dyn StateStore>, service: Arc<dyn CompletionService>) -> Self {
        Self {
            store,
            service,
            options: CaptureOptions::default(),
        }
    }

    /// Model and generation settings applied to resumed sessions.
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    /// # Errors
    ///
    /// - `Store(NotFound)` if nothing is saved under the id
    /// - `MalformedState` if the saved snapshot is inconsistent
    pub async fn handle(&self, cmd: ResumeSessionCommand) -> Result<GuidedCapture, CaptureError> {
        let state = self.store.load(cmd.session_id).await?;
        let session = GuidedCapture::load_state_with_options(
            state,
            self.service.clone(),
            self.options.clone(),
        )?;

        debug!(
            session_id = %cmd.session_id,
            status = %session.status(),
            "session resumed"
        );
        Ok(session)
    }
}
