//! LLM provider abstractions for Character Chat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `CompletionClient`: the single call every component goes through

pub mod box_provider;
pub mod client;
pub mod provider;
