//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`] trait
//! defined in `charchat-core`, a provider factory ([`create_provider`])
//! that picks base URL and capabilities from a [`ProviderConfig`], and
//! [`api_key_env`], which names the variable holding that provider's key.
//!
//! [`LlmProvider`]: charchat_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use charchat_core::llm::box_provider::BoxLlmProvider;
use charchat_types::llm::ProviderConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config;
use crate::secret::{GEMINI_API_KEY, MISTRAL_API_KEY, OPENAI_API_KEY};

/// Environment variable that holds the API key for a provider name.
///
/// Mistral and Gemini have their own keys; OpenAI and custom endpoints
/// read `OPENAI_API_KEY`.
pub fn api_key_env(provider_name: &str) -> &'static str {
    match provider_name {
        "mistral" => MISTRAL_API_KEY,
        "gemini" => GEMINI_API_KEY,
        _ => OPENAI_API_KEY,
    }
}

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// An explicit `base_url` always wins; otherwise well-known provider names
/// map to their public endpoints and anything else falls back to OpenAI.
pub fn create_provider(provider_config: &ProviderConfig, api_key: SecretString) -> BoxLlmProvider {
    let model = provider_config.model.as_str();

    let oai_config = match provider_config.base_url.as_deref() {
        Some(base_url) => config::custom(&provider_config.name, base_url, api_key, model),
        None => match provider_config.name.as_str() {
            "mistral" => config::mistral_defaults(api_key, model),
            "gemini" => config::gemini_defaults(api_key, model),
            "openai" => config::openai_defaults(api_key, model),
            other => {
                tracing::warn!(provider = other, "unknown provider without base_url, using OpenAI");
                config::openai_defaults(api_key, model)
            }
        },
    };

    tracing::debug!(
        provider = %oai_config.provider_name,
        base_url = %oai_config.base_url,
        "creating chat-completion provider"
    );
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config))
}
