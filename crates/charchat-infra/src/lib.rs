//! Infrastructure implementations for Character Chat.
//!
//! Concrete adapters for the ports defined in `charchat-core`:
//! the OpenAI-compatible chat-completion provider, file transcripts and web
//! source catalogs, plus configuration, secret and data-directory helpers.

pub mod catalog;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod transcript;
