//! Configuration loader for Character Chat.
//!
//! Reads `config.toml` (from the data directory, or an explicit path) and
//! deserializes it into [`AppConfig`]. Falls back to defaults when the file
//! is missing or malformed.

use std::path::{Path, PathBuf};

use charchat_core::llm::client::TEMPERATURE_RANGE;
use charchat_types::config::AppConfig;
use charchat_types::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config location inside the data directory.
pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

/// Read and parse a config file, reporting what went wrong.
pub async fn try_load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<AppConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file cannot be read or parsed, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> AppConfig {
    match try_load_config(path).await {
        Ok(Some(config)) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            AppConfig::default()
        }
    }
}

/// Reject settings that parse but would make every request fail.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let temperature = config.models.chat_temperature;
    if !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(ConfigError::Invalid(format!(
            "models.chat_temperature = {temperature} is outside [0, 2]"
        )));
    }
    if config.provider.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "provider.request_timeout_secs must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
