//! Plain-data snapshot of an interview.
//!
//! `CaptureState` is what gets persisted and restored. Its field names are
//! the on-disk contract and must not change:
//!
//! ```json
//! {
//!   "topic": "Company Vision",
//!   "output_format_description": "A one-sentence mission statement",
//!   "num_questions": 5,
//!   "questions": ["Who are your customers?"],
//!   "answers": {"Who are your customers?": ""},
//!   "questions_generated": true,
//!   "synthesis_complete": false,
//!   "final_output": null
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::errors::CaptureError;
use super::status::CaptureStatus;

/// An answer counts only if it has non-whitespace content.
pub fn is_answered(answer: &str) -> bool {
    !answer.trim().is_empty()
}

/// Serializable snapshot of a `GuidedCapture`.
///
/// Holds no reference to the completion service; that has to be supplied
/// again when the snapshot is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureState {
    pub topic: String,
    pub output_format_description: String,
    pub num_questions: u32,
    pub questions: Vec<String>,
    pub answers: BTreeMap<String, String>,
    pub questions_generated: bool,
    pub synthesis_complete: bool,
    #[serde(default)]
    pub final_output: Option<String>,
}

impl CaptureState {
    /// Decodes a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        serde_json::from_str(json).map_err(|e| CaptureError::malformed_state(e.to_string()))
    }

    /// Decodes a snapshot from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CaptureError> {
        serde_json::from_value(value).map_err(|e| CaptureError::malformed_state(e.to_string()))
    }

    /// Encodes the snapshot as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of questions with an answer that [`is_answered`] accepts.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.get(*q).is_some_and(|a| is_answered(a)))
            .count()
    }

    /// Checks the snapshot describes a session that could actually exist.
    ///
    /// Returns the lifecycle status implied by the flags.
    pub fn validate(&self) -> Result<CaptureStatus, CaptureError> {
        if self.topic.trim().is_empty() {
            return Err(CaptureError::malformed_state("topic is empty"));
        }
        if self.output_format_description.trim().is_empty() {
            return Err(CaptureError::malformed_state(
                "output_format_description is empty",
            ));
        }
        if self.num_questions == 0 {
            return Err(CaptureError::malformed_state("num_questions is 0"));
        }

        let status = CaptureStatus::from_flags(self.questions_generated, self.synthesis_complete)
            .ok_or_else(|| {
                CaptureError::malformed_state("synthesis_complete set without questions_generated")
            })?;

        if self.final_output.is_some() != self.synthesis_complete {
            return Err(CaptureError::malformed_state(
                "final_output must be present exactly when synthesis_complete is set",
            ));
        }

        if self.questions_generated {
            let limit = self.num_questions as usize;
            if self.questions.is_empty() || self.questions.len() > limit {
                return Err(CaptureError::malformed_state(format!(
                    "{} questions recorded, expected 1..={}",
                    self.questions.len(),
                    limit
                )));
            }
        } else if !self.questions.is_empty() {
            return Err(CaptureError::malformed_state(
                "questions present without questions_generated",
            ));
        }

        let mut seen = BTreeSet::new();
        if let Some(dup) = self.questions.iter().find(|q| !seen.insert(q.as_str())) {
            return Err(CaptureError::malformed_state(format!(
                "duplicate question {:?}",
                dup
            )));
        }
        if let Some(blank) = self.questions.iter().find(|q| q.trim().is_empty()) {
            return Err(CaptureError::malformed_state(format!(
                "blank question {:?}",
                blank
            )));
        }

        if let Some(stray) = self.answers.keys().find(|q| !self.questions.contains(q)) {
            return Err(CaptureError::malformed_state(format!(
                "answer recorded for unknown question {:?}",
                stray
            )));
        }

        Ok(status)
    }
}
