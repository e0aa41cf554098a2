//! Classification of raw input lines for the conversation loop.
//!
//! A line is either ignored (blank), the quit sentinel, a slash command, or a
//! message for the character.

/// In-chat slash commands that do not end the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Show the conversation so far.
    History,
    /// Unrecognised `/...` input.
    Unknown(String),
}

/// What a single input line asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Empty,
    Quit,
    Command(ChatCommand),
    Message(String),
}

/// The word that ends a session when typed on its own line.
pub const QUIT_SENTINEL: &str = "quit";

/// Parse one input line.
pub fn parse_input(line: &str) -> UserInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return UserInput::Empty;
    }

    if trimmed.eq_ignore_ascii_case(QUIT_SENTINEL) {
        return UserInput::Quit;
    }

    if !trimmed.starts_with('/') {
        return UserInput::Message(trimmed.to_string());
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/quit" | "/exit" | "/q" => UserInput::Quit,
        "/help" | "/h" | "/?" => UserInput::Command(ChatCommand::Help),
        "/history" => UserInput::Command(ChatCommand::History),
        other => UserInput::Command(ChatCommand::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_sentinel() {
        assert_eq!(parse_input("quit"), UserInput::Quit);
        assert_eq!(parse_input("  QUIT \n"), UserInput::Quit);
        assert_eq!(parse_input("Quit"), UserInput::Quit);
    }

    #[test]
    fn test_parse_quit_aliases() {
        assert_eq!(parse_input("/quit"), UserInput::Quit);
        assert_eq!(parse_input("/exit"), UserInput::Quit);
        assert_eq!(parse_input("/Q"), UserInput::Quit);
    }

    #[test]
    fn test_parse_quit_inside_sentence_is_message() {
        assert_eq!(
            parse_input("I quit my job today"),
            UserInput::Message("I quit my job today".to_string())
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_input(""), UserInput::Empty);
        assert_eq!(parse_input("   \t"), UserInput::Empty);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("/help"), UserInput::Command(ChatCommand::Help));
        assert_eq!(parse_input("/?"), UserInput::Command(ChatCommand::Help));
        assert_eq!(parse_input("/history"), UserInput::Command(ChatCommand::History));
        assert_eq!(
            parse_input("/foo bar"),
            UserInput::Command(ChatCommand::Unknown("/foo".to_string()))
        );
    }

    #[test]
    fn test_parse_message_is_trimmed() {
        assert_eq!(
            parse_input("  Hello, Hermione!  "),
            UserInput::Message("Hello, Hermione!".to_string())
        );
    }
}
