//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `GUIDED_CAPTURE` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use guided_capture::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Sessions live in {}", config.capture.state_dir.display());
//! ```

mod ai;
mod capture;
mod error;
mod logging;

pub use ai::{AiConfig, AiProvider};
pub use capture::CaptureConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the primary provider's API key must be
/// supplied. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Interview defaults and session storage
    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `GUIDED_CAPTURE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GUIDED_CAPTURE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `GUIDED_CAPTURE__CAPTURE__NUM_QUESTIONS=3` -> `capture.num_questions = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GUIDED_CAPTURE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.capture.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::StateFormat;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "GUIDED_CAPTURE__AI__OPENAI_API_KEY",
        "GUIDED_CAPTURE__AI__ANTHROPIC_API_KEY",
        "GUIDED_CAPTURE__AI__PRIMARY_PROVIDER",
        "GUIDED_CAPTURE__AI__MODEL",
        "GUIDED_CAPTURE__CAPTURE__NUM_QUESTIONS",
        "GUIDED_CAPTURE__CAPTURE__STATE_FORMAT",
        "GUIDED_CAPTURE__CAPTURE__STATE_DIR",
        "GUIDED_CAPTURE__LOGGING__LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("GUIDED_CAPTURE__AI__OPENAI_API_KEY", "sk-test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_openai());
        assert_eq!(config.ai.primary_provider, AiProvider::OpenAI);
        assert_eq!(config.capture.num_questions, 5);
        assert_eq!(config.capture.state_format, StateFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("GUIDED_CAPTURE__AI__ANTHROPIC_API_KEY", "sk-ant-test");
        env::set_var("GUIDED_CAPTURE__AI__PRIMARY_PROVIDER", "anthropic");
        env::set_var("GUIDED_CAPTURE__AI__MODEL", "claude-3-haiku-20240307");
        env::set_var("GUIDED_CAPTURE__CAPTURE__NUM_QUESTIONS", "3");
        env::set_var("GUIDED_CAPTURE__CAPTURE__STATE_FORMAT", "yaml");
        env::set_var("GUIDED_CAPTURE__LOGGING__LEVEL", "debug");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.primary_provider, AiProvider::Anthropic);
        assert_eq!(config.ai.model.as_deref(), Some("claude-3-haiku-20240307"));
        assert_eq!(config.capture.num_questions, 3);
        assert_eq!(config.capture.state_format, StateFormat::Yaml);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_primary_key() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_error_converts_to_config_error() {
        let err: ConfigError = ValidationError::InvalidQuestionCount.into();
        assert!(err.to_string().contains("num_questions"));
    }
}
