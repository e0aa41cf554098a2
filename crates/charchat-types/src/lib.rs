//! Shared domain types for Character Chat.
//!
//! This crate contains the core domain types used across the workspace:
//! LLM messages and requests, classification verdicts, chat sessions,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod verdict;
