//! Completion provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Provider used for every completion
    #[serde(default = "default_provider")]
    pub primary_provider: AiProvider,

    /// Model override; each provider has its own default
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Base URL override, e.g. for a local proxy
    pub base_url: Option<String>,
}

/// Completion provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        has_key(&self.openai_api_key)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        has_key(&self.anthropic_api_key)
    }

    /// API key for the primary provider, if set
    pub fn primary_api_key(&self) -> Option<&Secret<String>> {
        match self.primary_provider {
            AiProvider::OpenAI => self.openai_api_key.as_ref(),
            AiProvider::Anthropic => self.anthropic_api_key.as_ref(),
        }
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.primary_provider {
            AiProvider::OpenAI if !self.has_openai() => {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            AiProvider::Anthropic if !self.has_anthropic() => {
                return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
            }
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

fn has_key(key: &Option<Secret<String>>) -> bool {
    key.as_ref()
        .is_some_and(|k| !k.expose_secret().trim().is_empty())
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            primary_provider: default_provider(),
            model: None,
            timeout_secs: default_timeout(),
            base_url: None,
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::OpenAI
}

fn default_timeout() -> u64 {
    120
}
