//! Environment variable secret lookup.
//!
//! API keys come from the process environment, optionally seeded from a
//! `.env` file in the working directory. Values are wrapped in
//! [`SecretString`] as soon as they are read.

use secrecy::SecretString;

use charchat_types::error::ConfigError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const MISTRAL_API_KEY: &str = "MISTRAL_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const GOOGLE_BOOKS_API_KEY: &str = "GOOGLE_BOOKS_API_KEY";

/// Load `.env` from the working directory if there is one.
///
/// Variables already set in the environment are not overridden.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }
}

/// Read an optional secret. Empty and non-Unicode values count as unset.
pub fn env_secret(key: &str) -> Option<SecretString> {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val.trim().to_string())),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(key, "environment variable is not valid Unicode, ignoring");
            None
        }
    }
}

/// Read a required secret.
pub fn require_env_secret(key: &str) -> Result<SecretString, ConfigError> {
    env_secret(key).ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_env_secret_present_and_trimmed() {
        // SAFETY: This test is single-threaded and uses a unique var name.
        unsafe {
            std::env::set_var("CHARCHAT_TEST_SECRET_PRESENT", " sk-123 ");
        }
        let secret = env_secret("CHARCHAT_TEST_SECRET_PRESENT").unwrap();
        assert_eq!(secret.expose_secret(), "sk-123");
        unsafe {
            std::env::remove_var("CHARCHAT_TEST_SECRET_PRESENT");
        }
    }

    #[test]
    fn test_env_secret_blank_is_none() {
        // SAFETY: This test is single-threaded and uses a unique var name.
        unsafe {
            std::env::set_var("CHARCHAT_TEST_SECRET_BLANK", "   ");
        }
        assert!(env_secret("CHARCHAT_TEST_SECRET_BLANK").is_none());
        unsafe {
            std::env::remove_var("CHARCHAT_TEST_SECRET_BLANK");
        }
    }

    #[test]
    fn test_require_missing_secret() {
        let err = require_env_secret("CHARCHAT_TEST_SECRET_MISSING").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ref key) if key == "CHARCHAT_TEST_SECRET_MISSING"));
    }
}
