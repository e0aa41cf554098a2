//! Chat session types for Character Chat.
//!
//! A session is one run of the program: the character being played, the
//! linear transcript, and how the conversation ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

use crate::verdict::CharacterCheck;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// Lifecycle status of a chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
    Aborted,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Aborted => write!(f, "aborted"),
        }
    }
}

/// Who asked for the session to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Termination {
    /// The user typed the quit sentinel.
    UserQuit,
    /// Standard input was closed (Ctrl+D).
    InputClosed,
    /// The character said goodbye; `angry` distinguishes the tone.
    CharacterEnded { angry: bool },
}

impl Termination {
    pub fn is_angry(&self) -> bool {
        matches!(self, Termination::CharacterEnded { angry: true })
    }
}

/// What the user asked to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRequest {
    /// Book, movie, show, or franchise name.
    pub source_material: String,
    /// Character name as typed by the user.
    pub character: String,
    /// Optional "where/when" context for the conversation.
    pub setting: Option<String>,
}

impl CharacterRequest {
    pub fn new(
        source_material: impl Into<String>,
        character: impl Into<String>,
        setting: Option<String>,
    ) -> Self {
        Self {
            source_material: source_material.into().trim().to_string(),
            character: character.into().trim().to_string(),
            setting: setting
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// A chat session between the user and one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub request: CharacterRequest,
    pub check: CharacterCheck,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub model: String,
    pub status: SessionStatus,
    pub termination: Option<Termination>,
    /// Whether the user chose to keep the transcript file.
    pub transcript_kept: Option<bool>,
}

impl ChatSession {
    pub fn new(request: CharacterRequest, check: CharacterCheck, model: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            request,
            check,
            started_at: Utc::now(),
            ended_at: None,
            model: model.into(),
            status: SessionStatus::Active,
            termination: None,
            transcript_kept: None,
        }
    }

    /// Name of the character for display and transcripts.
    pub fn character_name(&self) -> &str {
        self.check.display_name(&self.request.character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::ExistenceVerdict;

    #[test]
    fn test_session_status_display_matches_serde() {
        for status in [
            SessionStatus::Active,
            SessionStatus::Completed,
            SessionStatus::Aborted,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn test_character_request_trims_and_drops_empty_setting() {
        let request = CharacterRequest::new("  Harry Potter ", " Hermione", Some("   ".to_string()));
        assert_eq!(request.source_material, "Harry Potter");
        assert_eq!(request.character, "Hermione");
        assert!(request.setting.is_none());
    }

    #[test]
    fn test_termination_serde() {
        let json = serde_json::to_string(&Termination::CharacterEnded { angry: true }).unwrap();
        assert_eq!(json, r#"{"by":"character_ended","angry":true}"#);
        assert!(Termination::CharacterEnded { angry: true }.is_angry());
        assert!(!Termination::UserQuit.is_angry());
    }

    #[test]
    fn test_session_character_name_uses_correction() {
        let session = ChatSession::new(
            CharacterRequest::new("Harry Potter", "hermione", None),
            CharacterCheck {
                verdict: ExistenceVerdict::Female,
                corrected_name: Some("Hermione".to_string()),
            },
            "gpt-4o-mini",
        );
        assert_eq!(session.character_name(), "Hermione");
        assert_eq!(session.status, SessionStatus::Active);
    }
}
