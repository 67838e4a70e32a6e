//! Builds the configured completion provider.

use secrecy::ExposeSecret;
use std::sync::Arc;

use super::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use crate::config::{AiConfig, AiProvider};
use crate::ports::{AIError, CompletionService};

/// Creates the primary provider named by `config`.
///
/// # Errors
///
/// `AIError::AuthenticationFailed` if the provider's API key is not set,
/// `AIError::InvalidRequest` if the HTTP client cannot be built.
pub fn completion_service_from_config(
    config: &AiConfig,
) -> Result<Arc<dyn CompletionService>, AIError> {
    let api_key = config
        .primary_api_key()
        .map(|k| k.expose_secret().clone())
        .filter(|k| !k.trim().is_empty())
        .ok_or(AIError::AuthenticationFailed)?;

    match config.primary_provider {
        AiProvider::OpenAI => {
            let mut provider_config = OpenAIConfig::new(api_key).with_timeout(config.timeout());
            if let Some(ref model) = config.model {
                provider_config = provider_config.with_model(model);
            }
            if let Some(ref url) = config.base_url {
                provider_config = provider_config.with_base_url(url);
            }
            Ok(Arc::new(OpenAIProvider::new(provider_config)?))
        }
        AiProvider::Anthropic => {
            let mut provider_config =
                AnthropicConfig::new(api_key).with_timeout(config.timeout());
            if let Some(ref model) = config.model {
                provider_config = provider_config.with_model(model);
            }
            if let Some(ref url) = config.base_url {
                provider_config = provider_config.with_base_url(url);
            }
            Ok(Arc::new(AnthropicProvider::new(provider_config)?))
        }
    }
}
