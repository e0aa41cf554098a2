//! ChatConsole port: the terminal as seen by the conversation loop.
//!
//! The CLI implements this over rustyline-async; tests use a scripted
//! console. Rendering (colours, layout) is entirely the implementor's job.

use std::future::Future;

/// One read from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Line(String),
    /// End of input (Ctrl+D or a closed stdin).
    Closed,
}

/// Everything the loop asks the console to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    /// An in-character reply.
    Reply { speaker: String, text: String },
    /// The character ended the conversation.
    Farewell { speaker: String, angry: bool },
    /// A turn failed; the user may retry it.
    TurnFailed { error: String, retryable: bool },
    Help,
    /// `(speaker, text)` pairs of the conversation so far.
    History(Vec<(String, String)>),
    UnknownCommand(String),
}

/// Line-oriented terminal used by the conversation loop.
///
/// Terminal handles are not required to be `Send`; the loop runs on the
/// task that owns the console.
pub trait ChatConsole {
    /// Wait for the next input line.
    fn read_line(&mut self) -> impl Future<Output = ConsoleInput>;

    /// Show one item to the user.
    fn show(&mut self, line: ConsoleLine);

    /// Ask a yes/no question. Anything but an explicit yes is `false`.
    fn confirm(&mut self, question: &str) -> impl Future<Output = bool>;
}
