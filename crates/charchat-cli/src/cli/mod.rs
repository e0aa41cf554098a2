//! CLI definition for the `charchat` binary.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

use charchat_core::llm::client::TEMPERATURE_RANGE;
use charchat_types::config::AppConfig;

fn parse_temperature(value: &str) -> Result<f64, String> {
    let temperature: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if TEMPERATURE_RANGE.contains(&temperature) {
        Ok(temperature)
    } else {
        Err(format!("{temperature} is outside [0, 2]"))
    }
}

/// Talk to your favorite characters from books, movies and TV shows.
#[derive(Parser, Debug)]
#[command(name = "charchat", version, about, long_about = None)]
pub struct Cli {
    /// Book, movie, show or franchise (prompted for when omitted).
    #[arg(long)]
    pub source: Option<String>,

    /// Character to talk to (prompted for when omitted).
    #[arg(long)]
    pub character: Option<String>,

    /// Where/when the conversation takes place, or any other context.
    #[arg(long)]
    pub setting: Option<String>,

    /// Model that plays the character.
    #[arg(long)]
    pub model: Option<String>,

    /// Model used to check the character and detect goodbyes.
    #[arg(long)]
    pub classifier_model: Option<String>,

    /// Sampling temperature for in-character replies (0 to 2).
    #[arg(long, value_parser = parse_temperature)]
    pub temperature: Option<f64>,

    /// Do not write a transcript file.
    #[arg(long)]
    pub no_save: bool,

    /// Config file (defaults to config.toml in the data directory).
    #[arg(long, env = "CHARCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlay command-line flags on the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.models.chat = model.clone();
        }
        if let Some(model) = &self.classifier_model {
            config.models.classifier = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.models.chat_temperature = temperature;
        }
        if self.no_save {
            config.transcripts.enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "charchat",
            "--source",
            "Harry Potter",
            "--character",
            "Hermione",
            "--temperature",
            "0.5",
            "--no-save",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.source.as_deref(), Some("Harry Potter"));
        assert_eq!(cli.character.as_deref(), Some("Hermione"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_save);
    }

    #[test]
    fn test_temperature_out_of_range_is_rejected() {
        for value in ["2.5", "-1", "hot"] {
            let result = Cli::try_parse_from(["charchat", "--temperature", value]);
            assert!(result.is_err(), "{value} should be rejected");
        }
        let cli = Cli::try_parse_from(["charchat", "--temperature", "2"]).unwrap();
        assert_eq!(cli.temperature, Some(2.0));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "charchat",
            "--model",
            "gpt-4o",
            "--classifier-model",
            "gpt-4o-mini",
            "--temperature",
            "1.1",
            "--no-save",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.models.chat, "gpt-4o");
        assert_eq!(config.models.classifier, "gpt-4o-mini");
        assert!((config.models.chat_temperature - 1.1).abs() < f64::EPSILON);
        assert!(!config.transcripts.enabled);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["charchat"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.models.chat, "gpt-4o-mini");
        assert!(config.transcripts.enabled);
    }
}
