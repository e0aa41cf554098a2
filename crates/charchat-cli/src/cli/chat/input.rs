//! Terminal console for the chat loop.
//!
//! Wraps `rustyline_async::Readline` so replies can be printed through the
//! `SharedWriter` without clobbering the prompt.

use std::io::Write;

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use charchat_core::chat::console::{ChatConsole, ConsoleInput, ConsoleLine};

use super::render::render_line;

/// Whether a confirmation answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Async line console implementing [`ChatConsole`].
pub struct TerminalConsole {
    rl: Readline,
    out: SharedWriter,
    prompt: String,
}

impl TerminalConsole {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ReadlineError> {
        let prompt = prompt.into();
        let (rl, out) = Readline::new(prompt.clone())?;
        Ok(Self { rl, out, prompt })
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }

    /// Ctrl+D and Ctrl+C both close the input.
    async fn next_event(&mut self) -> ConsoleInput {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => ConsoleInput::Line(line),
            Ok(ReadlineEvent::Eof) | Ok(ReadlineEvent::Interrupted) => ConsoleInput::Closed,
            Err(e) => {
                tracing::warn!(error = %e, "readline failed, closing input");
                ConsoleInput::Closed
            }
        }
    }
}

impl ChatConsole for TerminalConsole {
    async fn read_line(&mut self) -> ConsoleInput {
        self.next_event().await
    }

    fn show(&mut self, line: ConsoleLine) {
        let text = render_line(&line);
        self.write(&text);
    }

    async fn confirm(&mut self, question: &str) -> bool {
        if let Err(e) = self.rl.update_prompt(&format!("{question} [y/N] ")) {
            tracing::warn!(error = %e, "failed to update prompt");
        }
        let answer = self.next_event().await;
        let prompt = self.prompt.clone();
        if let Err(e) = self.rl.update_prompt(&prompt) {
            tracing::warn!(error = %e, "failed to restore prompt");
        }

        match answer {
            ConsoleInput::Line(line) => is_yes(&line),
            ConsoleInput::Closed => false,
        }
    }
}
