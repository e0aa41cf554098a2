//! Text rendering for everything the conversation loop shows.

use console::style;

use charchat_core::chat::console::ConsoleLine;

/// Render one [`ConsoleLine`] as terminal text (may span several lines).
pub fn render_line(line: &ConsoleLine) -> String {
    match line {
        ConsoleLine::Reply { speaker, text } => {
            format!("{} {}", style(format!("{speaker}:")).cyan().bold(), text)
        }
        ConsoleLine::Farewell { speaker, angry: true } => format!(
            "\n  {}",
            style(format!("{speaker} storms off and ends the conversation.")).red()
        ),
        ConsoleLine::Farewell { speaker, angry: false } => format!(
            "\n  {}",
            style(format!("{speaker} has said goodbye.")).green()
        ),
        ConsoleLine::TurnFailed { error, retryable } => {
            let hint = if *retryable {
                "Type a message to retry."
            } else {
                "Check your provider settings, then try again."
            };
            format!(
                "  {} {}\n  {}",
                style("Error:").red().bold(),
                error,
                style(hint).dim()
            )
        }
        ConsoleLine::Help => render_help(),
        ConsoleLine::History(entries) if entries.is_empty() => {
            format!("  {}", style("No messages yet.").dim())
        }
        ConsoleLine::History(entries) => entries
            .iter()
            .map(|(speaker, text)| format!("  {} {}", style(format!("{speaker}:")).bold(), text))
            .collect::<Vec<_>>()
            .join("\n"),
        ConsoleLine::UnknownCommand(cmd) => format!(
            "  {} {}. Type {} for available commands.",
            style("Unknown command:").yellow(),
            cmd,
            style("/help").cyan()
        ),
    }
}

fn render_help() -> String {
    [
        String::new(),
        format!("  {}", style("Available commands:").bold()),
        String::new(),
        format!("  {}     {}", style("/help").cyan(), "Show this help message"),
        format!("  {}  {}", style("/history").cyan(), "Show the conversation so far"),
        format!("  {}     {}", style("/quit").cyan(), "End the conversation (or type 'quit')"),
        String::new(),
        format!("  {}", style("Ctrl+D to exit").dim()),
    ]
    .join("\n")
}
