use thiserror::Error;

/// Errors related to transcript persistence.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript directory unavailable: {0}")]
    Directory(String),

    #[error("failed to write transcript: {0}")]
    Write(String),

    #[error("failed to remove transcript: {0}")]
    Remove(String),

    #[error("transcript already finished")]
    Finished,
}

/// Errors from source material catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(String),

    #[error("catalog returned status {0}")]
    Status(u16),

    #[error("unexpected catalog response: {0}")]
    Response(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("missing required environment variable '{0}'")]
    MissingEnv(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_error_display() {
        let err = TranscriptError::Write("disk full".to_string());
        assert_eq!(err.to_string(), "failed to write transcript: disk full");
    }

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(CatalogError::Status(503).to_string(), "catalog returned status 503");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnv("OPENAI_API_KEY".to_string());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
