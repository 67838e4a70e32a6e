//! Interview-specific error types.

use crate::domain::foundation::{TransitionError, ValidationError};
use crate::ports::{AIError, StateStoreError};

/// Errors raised by the interview session and its handlers.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Bad constructor input (empty topic, zero questions, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The completion service call failed.
    #[error("completion service failed: {0}")]
    UpstreamService(#[from] AIError),

    /// Question generation output could not be read as a list of questions.
    #[error("malformed completion response: {reason}")]
    MalformedResponse {
        reason: String,
        /// The untouched model output, for diagnostics.
        raw: String,
    },

    /// An answer was submitted for a question that is not in the current set.
    #[error("unknown question: {0:?}")]
    UnknownQuestion(String),

    /// A snapshot was missing fields or internally inconsistent.
    #[error("malformed state: {0}")]
    MalformedState(String),

    /// The operation is not allowed in the session's current status.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(#[from] TransitionError),

    /// Persisting or loading a snapshot failed.
    #[error("state store error: {0}")]
    Store(#[from] StateStoreError),
}

impl CaptureError {
    pub fn malformed_response(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        CaptureError::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn unknown_question(question: impl Into<String>) -> Self {
        CaptureError::UnknownQuestion(question.into())
    }

    pub fn malformed_state(message: impl Into<String>) -> Self {
        CaptureError::MalformedState(message.into())
    }

    /// Raw model output attached to a `MalformedResponse`.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            CaptureError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
