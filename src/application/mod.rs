//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write snapshots; query handlers read them.

pub mod handlers;

pub use handlers::{
    ListSessionsHandler, ResumeSessionCommand, ResumeSessionHandler, SaveSessionCommand,
    SaveSessionHandler, SessionSummary,
};
