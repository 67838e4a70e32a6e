//! Guided Capture - LLM-guided structured interviews
//!
//! A session asks a completion service for clarifying questions about a
//! topic, collects the user's answers, then has the service synthesize them
//! into an artifact in the requested format. Sessions can be snapshotted,
//! stored and resumed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
