//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("num_questions must be at least 1")]
    InvalidQuestionCount,

    #[error("temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("max_tokens must be at least 1")]
    InvalidMaxTokens,

    #[error("state_dir must not be empty")]
    EmptyStateDir,
}
