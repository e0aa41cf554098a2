//! Configuration types for Character Chat.
//!
//! `AppConfig` represents `config.toml` in the data directory. Every field has
//! a default so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub persona: PersonaOptions,
    #[serde(default)]
    pub transcripts: TranscriptConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Model identifiers and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model that plays the character.
    #[serde(default = "default_chat_model")]
    pub chat: String,
    /// Cheaper model used for the existence and goodbye classifiers.
    #[serde(default = "default_classifier_model")]
    pub classifier: String,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f64,
    /// Cap on in-character reply length. 0 disables the cap.
    #[serde(default = "default_max_reply_tokens")]
    pub max_reply_tokens: u32,
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_classifier_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_chat_temperature() -> f64 {
    0.8
}

fn default_max_reply_tokens() -> u32 {
    256
}

impl ModelsConfig {
    /// The reply cap as a request option.
    pub fn reply_token_cap(&self) -> Option<u32> {
        (self.max_reply_tokens > 0).then_some(self.max_reply_tokens)
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: default_chat_model(),
            classifier: default_classifier_model(),
            chat_temperature: default_chat_temperature(),
            max_reply_tokens: default_max_reply_tokens(),
        }
    }
}

/// Which OpenAI-compatible endpoint to talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_name")]
    pub name: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// How strictly the model must stay in character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Relaxed,
    #[default]
    Strict,
}

/// Conversational attitude of the character towards the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Curious,
    Neutral,
}

/// Swappable options for the persona system prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaOptions {
    #[serde(default)]
    pub strictness: Strictness,
    #[serde(default)]
    pub tone: Tone,
}

/// Where and whether transcripts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory for transcript files; relative paths resolve against the data dir.
    #[serde(default = "default_transcript_dir")]
    pub dir: String,
}

fn default_true() -> bool {
    true
}

fn default_transcript_dir() -> String {
    "transcripts".to_string()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_transcript_dir(),
        }
    }
}

/// Optional web lookup that the source material exists at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub enabled: bool,
}
