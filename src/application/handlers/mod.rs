//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod capture;

pub use capture::{
    ListSessionsHandler, ResumeSessionCommand, ResumeSessionHandler, SaveSessionCommand,
    SaveSessionHandler, SessionSummary,
};
