//! Business logic and port trait definitions for Character Chat.
//!
//! This crate defines the "ports" (provider, console, transcript and catalog
//! traits) that the infrastructure and CLI layers implement. It depends only
//! on `charchat-types` -- never on `charchat-infra` or any HTTP/IO crate.

pub mod catalog;
pub mod chat;
pub mod classify;
pub mod llm;
pub mod persona;

#[cfg(test)]
pub(crate) mod testing;
