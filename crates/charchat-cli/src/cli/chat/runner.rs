//! Session orchestration.
//!
//! Coordinates the full program run: configuration, provider setup, the
//! setup questions, the source and character checks, the conversation loop,
//! and session bookkeeping.

use std::time::Duration;

use anyhow::Context;
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use charchat_core::catalog::source_is_known;
use charchat_core::chat::conversation::{ConversationLoop, ReplySettings};
use charchat_core::chat::session::SessionManager;
use charchat_core::chat::start::start_conversation;
use charchat_core::classify::GoodbyeClassifier;
use charchat_core::llm::client::CompletionClient;
use charchat_infra::catalog::WebCatalog;
use charchat_infra::config::{default_config_path, load_config, validate_config};
use charchat_infra::filesystem::{resolve_data_dir, resolve_in_data_dir};
use charchat_infra::llm::{api_key_env, create_provider};
use charchat_infra::secret::require_env_secret;
use charchat_infra::transcript::FileTranscript;
use charchat_types::chat::{CharacterRequest, ChatSession};
use charchat_types::config::AppConfig;
use charchat_types::llm::ProviderConfig;

use crate::cli::Cli;

use super::banner::{print_chat_banner, print_welcome_banner};
use super::input::TerminalConsole;

fn spinner(message: String) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Ctrl+D or Ctrl+C at a prompt.
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(
        err,
        dialoguer::Error::IO(e)
            if matches!(e.kind(), std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::Interrupted)
    )
}

/// Return the flag value, or ask for it. `None` when the user cancels.
fn ask(flag: Option<&str>, prompt: &str, allow_empty: bool) -> anyhow::Result<Option<String>> {
    if let Some(value) = flag {
        return Ok(Some(value.to_string()));
    }
    match Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
    {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_cancelled(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Ask for the source material until a configured catalog knows it.
async fn ask_source_material(cli: &Cli, config: &AppConfig) -> anyhow::Result<Option<String>> {
    let catalogs = if config.catalog.enabled {
        WebCatalog::from_env()
    } else {
        Vec::new()
    };
    if config.catalog.enabled && catalogs.is_empty() {
        warn!("catalog lookup enabled but no OMDB_API_KEY or GOOGLE_BOOKS_API_KEY set, skipping");
    }

    let mut flag = cli.source.as_deref();
    loop {
        let Some(source) = ask(
            flag.take(),
            "What is the name of the book, movie, show, franchise?",
            false,
        )?
        else {
            return Ok(None);
        };

        if catalogs.is_empty() {
            return Ok(Some(source));
        }

        let spinner = spinner(format!("Looking up {source}..."))?;
        let known = source_is_known(&catalogs, &source).await;
        spinner.finish_and_clear();

        if known {
            return Ok(Some(source));
        }
        println!();
        println!(
            "  {}",
            style("Sorry, we don't have that source material. Please try again. (or Ctrl+D to exit)")
                .yellow()
        );
        println!();
    }
}

/// Collect what the user wants to talk to. `None` when the user cancels.
async fn ask_request(cli: &Cli, config: &AppConfig) -> anyhow::Result<Option<CharacterRequest>> {
    let Some(source) = ask_source_material(cli, config).await? else {
        return Ok(None);
    };
    let Some(character) = ask(
        cli.character.as_deref(),
        "What is the name of the character?",
        false,
    )?
    else {
        return Ok(None);
    };
    let Some(setting) = ask(
        cli.setting.as_deref(),
        "---Optional--- Where/when does the conversation take place? Any other context?",
        true,
    )?
    else {
        return Ok(None);
    };
    Ok(Some(CharacterRequest::new(source, character, Some(setting))))
}

/// Run one interactive chat session.
pub async fn run_session(cli: &Cli) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&data_dir));
    let mut config = load_config(&config_path).await;
    cli.apply_overrides(&mut config);
    validate_config(&config)
        .with_context(|| format!("fix the settings in {}", config_path.display()))?;

    let key_env = api_key_env(&config.provider.name);
    let api_key = require_env_secret(key_env)
        .with_context(|| format!("set {key_env} in the environment or in a .env file"))?;
    let provider = create_provider(
        &ProviderConfig {
            name: config.provider.name.clone(),
            base_url: config.provider.base_url.clone(),
            model: config.models.chat.clone(),
        },
        api_key,
    );
    let client = CompletionClient::new(
        provider,
        Duration::from_secs(config.provider.request_timeout_secs),
    );
    info!(provider = client.provider_name(), model = %config.models.chat, "provider ready");

    print_welcome_banner();
    let Some(request) = ask_request(cli, &config).await? else {
        info!("setup cancelled");
        return Ok(());
    };

    let spinner = spinner(format!(
        "Checking that {} is a character in {}...",
        request.character, request.source_material
    ))?;
    let start = start_conversation(
        &client,
        &config.models.classifier,
        &request,
        config.persona,
    )
    .await;
    spinner.finish_and_clear();

    let Some(start) = start.context("could not verify the character")? else {
        println!();
        println!(
            "  {}",
            style(format!(
                "Sorry, {} doesn't seem to be a character in {}.",
                request.character, request.source_material
            ))
            .yellow()
        );
        println!();
        return Ok(());
    };

    let mut conversation = start.conversation;
    let mut session = SessionManager::new(ChatSession::new(
        request,
        start.check,
        config.models.chat.clone(),
    ));
    let character = session.session().character_name().to_string();

    print_chat_banner(
        &character,
        &session.session().request.source_material,
        &config.models.chat,
        &session.session().id.to_string(),
    );

    let mut transcript = if config.transcripts.enabled {
        let dir = resolve_in_data_dir(&data_dir, &config.transcripts.dir);
        match FileTranscript::create(&dir, &character).await {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                warn!(error = %e, "could not create transcript, continuing without saving");
                None
            }
        }
    } else {
        None
    };
    let transcript_path = transcript.as_ref().map(|t| t.path().to_path_buf());

    let mut console =
        TerminalConsole::new("You: ").context("failed to initialize terminal input")?;
    let chat_loop = ConversationLoop::new(
        &client,
        GoodbyeClassifier::new(&client, config.models.classifier.clone()),
        ReplySettings {
            model: config.models.chat.clone(),
            temperature: config.models.chat_temperature,
            max_tokens: config.models.reply_token_cap(),
        },
    );
    let outcome = chat_loop
        .run(&mut conversation, &mut console, &mut transcript)
        .await;
    drop(console);

    session.record_outcome(&outcome);

    println!();
    if let (Some(true), Some(path)) = (outcome.transcript_kept, transcript_path) {
        println!(
            "  {} {}",
            style("Transcript saved to").dim(),
            style(path.display()).cyan()
        );
    }
    println!(
        "  {}",
        style(format!(
            "Conversation with {character} ended after {} turn(s).",
            session.turn_count()
        ))
        .dim()
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_eof_and_interrupt_cancel_the_prompt() {
        let eof = dialoguer::Error::IO(io::Error::from(io::ErrorKind::UnexpectedEof));
        let interrupted = dialoguer::Error::IO(io::Error::from(io::ErrorKind::Interrupted));
        let broken = dialoguer::Error::IO(io::Error::from(io::ErrorKind::BrokenPipe));

        assert!(is_cancelled(&eof));
        assert!(is_cancelled(&interrupted));
        assert!(!is_cancelled(&broken));
    }

    #[test]
    fn test_flag_value_skips_the_prompt() {
        let value = ask(Some("Harry Potter"), "unused", false).unwrap();
        assert_eq!(value.as_deref(), Some("Harry Potter"));
    }
}
