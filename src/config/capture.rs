//! Interview and session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::storage::StateFormat;
use crate::domain::capture::{CaptureOptions, DEFAULT_NUM_QUESTIONS};

/// Interview configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Upper bound on generated questions
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,

    /// Directory holding saved sessions
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Encoding of saved sessions
    #[serde(default)]
    pub state_format: StateFormat,

    /// Sampling temperature passed to the provider
    pub temperature: Option<f32>,

    /// Completion length limit passed to the provider
    pub max_tokens: Option<u32>,
}

impl CaptureConfig {
    /// Session options derived from this configuration
    pub fn options(&self, model: Option<String>) -> CaptureOptions {
        CaptureOptions {
            num_questions: self.num_questions,
            model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_questions == 0 {
            return Err(ValidationError::InvalidQuestionCount);
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        if self.max_tokens == Some(0) {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.state_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyStateDir);
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            num_questions: default_num_questions(),
            state_dir: default_state_dir(),
            state_format: StateFormat::default(),
            temperature: None,
            max_tokens: None,
        }
    }
}

fn default_num_questions() -> u32 {
    DEFAULT_NUM_QUESTIONS
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./sessions")
}
