//! Closed-vocabulary classification results.
//!
//! Both classifiers turn free-text model output into one of these enums.
//! Unrecognised output never surfaces as an error: it maps to the safe
//! default (`ExistenceVerdict::No`, `GoodbyeVerdict::Continue`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a character exists in a work of fiction, and if so its gender tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistenceVerdict {
    No,
    Male,
    Female,
    Diverse,
}

impl ExistenceVerdict {
    /// True for every verdict except `No`.
    pub fn exists(&self) -> bool {
        !matches!(self, ExistenceVerdict::No)
    }
}

impl fmt::Display for ExistenceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExistenceVerdict::No => write!(f, "no"),
            ExistenceVerdict::Male => write!(f, "male"),
            ExistenceVerdict::Female => write!(f, "female"),
            ExistenceVerdict::Diverse => write!(f, "diverse"),
        }
    }
}

impl FromStr for ExistenceVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" => Ok(ExistenceVerdict::No),
            "male" => Ok(ExistenceVerdict::Male),
            "female" => Ok(ExistenceVerdict::Female),
            "diverse" => Ok(ExistenceVerdict::Diverse),
            other => Err(format!("invalid existence verdict: '{other}'")),
        }
    }
}

/// Result of the existence check: the verdict plus an optional corrected
/// character name supplied by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCheck {
    pub verdict: ExistenceVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_name: Option<String>,
}

impl CharacterCheck {
    pub fn not_found() -> Self {
        Self {
            verdict: ExistenceVerdict::No,
            corrected_name: None,
        }
    }

    /// The name to use for the rest of the session: the corrected name if
    /// the model supplied one, otherwise what the user typed.
    pub fn display_name<'a>(&'a self, requested: &'a str) -> &'a str {
        self.corrected_name.as_deref().unwrap_or(requested)
    }
}

/// Whether the character's latest reply ends the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodbyeVerdict {
    Continue,
    Goodbye,
    AngryGoodbye,
}

impl GoodbyeVerdict {
    pub fn ends_conversation(&self) -> bool {
        !matches!(self, GoodbyeVerdict::Continue)
    }
}

impl fmt::Display for GoodbyeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoodbyeVerdict::Continue => write!(f, "continue"),
            GoodbyeVerdict::Goodbye => write!(f, "goodbye"),
            GoodbyeVerdict::AngryGoodbye => write!(f, "angry goodbye"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existence_verdict_roundtrip() {
        for verdict in [
            ExistenceVerdict::No,
            ExistenceVerdict::Male,
            ExistenceVerdict::Female,
            ExistenceVerdict::Diverse,
        ] {
            let parsed: ExistenceVerdict = verdict.to_string().parse().unwrap();
            assert_eq!(verdict, parsed);
        }
    }

    #[test]
    fn test_existence_verdict_exists() {
        assert!(!ExistenceVerdict::No.exists());
        assert!(ExistenceVerdict::Diverse.exists());
    }

    #[test]
    fn test_display_name_prefers_correction() {
        let check = CharacterCheck {
            verdict: ExistenceVerdict::Female,
            corrected_name: Some("Hermione Granger".to_string()),
        };
        assert_eq!(check.display_name("hermione"), "Hermione Granger");
        assert_eq!(CharacterCheck::not_found().display_name("Bob"), "Bob");
    }

    #[test]
    fn test_goodbye_verdict_serde() {
        let json = serde_json::to_string(&GoodbyeVerdict::AngryGoodbye).unwrap();
        assert_eq!(json, "\"angry_goodbye\"");
        assert!(GoodbyeVerdict::AngryGoodbye.ends_conversation());
        assert!(!GoodbyeVerdict::Continue.ends_conversation());
    }
}
