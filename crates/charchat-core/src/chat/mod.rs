//! Chat session management for Character Chat.
//!
//! - `command`: input line classification (quit sentinel, slash commands)
//! - `console` / `transcript`: ports implemented by the CLI and infra crates
//! - `conversation`: the state machine and loop
//! - `session`: lifecycle bookkeeping for one program run
//! - `start`: existence check and persona before the loop runs

pub mod command;
pub mod console;
pub mod conversation;
pub mod session;
pub mod start;
pub mod transcript;
