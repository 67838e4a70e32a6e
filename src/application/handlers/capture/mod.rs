//! Capture handlers - persistence workflows around `GuidedCapture`.

mod list_sessions;
mod resume_session;
mod save_session;

pub use list_sessions::{ListSessionsHandler, SessionSummary};
pub use resume_session::{ResumeSessionCommand, ResumeSessionHandler};
pub use save_session::{SaveSessionCommand, SaveSessionHandler};
