//! Session manager for chat sessions.
//!
//! Wraps a `ChatSession` with turn tracking and lifecycle management.

use charchat_types::chat::{ChatSession, SessionStatus, Termination};
use chrono::Utc;

use super::conversation::SessionOutcome;

/// Manages the lifecycle and state of a single chat session.
pub struct SessionManager {
    session: ChatSession,
    /// Turn counter (one user message + one character reply).
    turn_count: u32,
}

impl SessionManager {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            turn_count: 0,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Mark the session as completed and record how it ended.
    pub fn mark_completed(&mut self, termination: Termination, transcript_kept: Option<bool>) {
        self.session.status = SessionStatus::Completed;
        self.session.termination = Some(termination);
        self.session.transcript_kept = transcript_kept;
        self.session.ended_at = Some(Utc::now());
    }

    /// Mark the session as aborted (input closed before a proper goodbye).
    pub fn mark_aborted(&mut self, termination: Termination, transcript_kept: Option<bool>) {
        self.session.status = SessionStatus::Aborted;
        self.session.termination = Some(termination);
        self.session.transcript_kept = transcript_kept;
        self.session.ended_at = Some(Utc::now());
    }

    /// Fold a finished conversation into the session.
    ///
    /// Closing the input stream counts as an abort; quitting and a
    /// character's goodbye complete the session.
    pub fn record_outcome(&mut self, outcome: &SessionOutcome) {
        self.turn_count = outcome.turns;
        match outcome.termination {
            Termination::InputClosed => {
                self.mark_aborted(outcome.termination, outcome.transcript_kept)
            }
            Termination::UserQuit | Termination::CharacterEnded { .. } => {
                self.mark_completed(outcome.termination, outcome.transcript_kept)
            }
        }

        match self.summary_json() {
            Ok(summary) => tracing::info!(
                session_id = %self.session.id,
                status = %self.session.status,
                turns = self.turn_count,
                angry = outcome.termination.is_angry(),
                session = %summary,
                "session finished"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to serialize session summary"),
        }
    }

    /// The session as a JSON object, including the turn count.
    pub fn summary_json(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(&self.session)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("turns".to_string(), self.turn_count.into());
        }
        serde_json::to_string(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charchat_types::chat::CharacterRequest;
    use charchat_types::verdict::{CharacterCheck, ExistenceVerdict};

    fn test_session() -> ChatSession {
        ChatSession::new(
            CharacterRequest::new("Harry Potter", "Hermione", None),
            CharacterCheck {
                verdict: ExistenceVerdict::Female,
                corrected_name: None,
            },
            "gpt-4o-mini",
        )
    }

    #[test]
    fn test_new_session_manager() {
        let mgr = SessionManager::new(test_session());
        assert_eq!(mgr.turn_count(), 0);
        assert_eq!(mgr.session().status, SessionStatus::Active);
        assert!(mgr.session().ended_at.is_none());
    }

    #[test]
    fn test_record_outcome_completed() {
        let mut mgr = SessionManager::new(test_session());
        mgr.record_outcome(&SessionOutcome {
            termination: Termination::CharacterEnded { angry: true },
            turns: 3,
            transcript_kept: Some(true),
        });

        assert_eq!(mgr.turn_count(), 3);
        assert_eq!(mgr.session().status, SessionStatus::Completed);
        assert_eq!(mgr.session().transcript_kept, Some(true));
        assert!(mgr.session().ended_at.is_some());
    }

    #[test]
    fn test_summary_json_describes_finished_session() {
        let mut mgr = SessionManager::new(test_session());
        mgr.record_outcome(&SessionOutcome {
            termination: Termination::UserQuit,
            turns: 2,
            transcript_kept: Some(false),
        });

        let summary: serde_json::Value = serde_json::from_str(&mgr.summary_json().unwrap()).unwrap();
        assert_eq!(summary["status"], "completed");
        assert_eq!(summary["turns"], 2);
        assert_eq!(summary["termination"]["by"], "user_quit");
        assert_eq!(summary["transcript_kept"], false);
        assert_eq!(summary["request"]["character"], "Hermione");
        assert!(summary["started_at"].is_string());
        assert!(summary["ended_at"].is_string());
    }

    #[test]
    fn test_record_outcome_input_closed_is_aborted() {
        let mut mgr = SessionManager::new(test_session());
        mgr.record_outcome(&SessionOutcome {
            termination: Termination::InputClosed,
            turns: 0,
            transcript_kept: None,
        });

        assert_eq!(mgr.session().status, SessionStatus::Aborted);
        assert_eq!(mgr.session().termination, Some(Termination::InputClosed));
    }
}
