//! Existence/gender classifier.
//!
//! Asks the classifier model whether a character appears in a work of
//! fiction. The model answers with one of `no`, `male`, `female`, `diverse`,
//! optionally preceded by the character's correct name
//! (e.g. "Hermione Granger female").

use charchat_types::llm::{LlmError, Message};
use charchat_types::verdict::{CharacterCheck, ExistenceVerdict};

use super::{CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE, strip_trailing_punctuation, strip_wrapping};
use crate::llm::client::CompletionClient;

/// System prompt for the existence check.
pub const EXISTENCE_SYSTEM_PROMPT: &str = r#"You verify characters in works of fiction (books, movies, TV shows, games, franchises).

The user asks whether a character appears in a given work. Answer with exactly one word:
- "no" if the character does not appear in that work
- "male", "female" or "diverse" for the character's gender if they do appear

If the user misspelled the name or gave only part of it, put the character's correct name (at most four words) before the gender word.

Examples:
- "Is Hermione a character in Harry Potter?" -> Hermione female
- "Is Frodo a character in The Lord of the Rings?" -> Frodo Baggins male
- "Is Hermione a character in Die Hard?" -> no

Do not add any other text."#;

/// Longest corrected name accepted from the model.
const MAX_NAME_WORDS: usize = 4;

/// Build the user message for the existence check.
pub fn existence_question(source_material: &str, character: &str) -> String {
    format!("Is {character} a character in {source_material}?")
}

/// Runs the existence check against the classifier model.
pub struct ExistenceClassifier<'a> {
    client: &'a CompletionClient,
    model: String,
}

impl<'a> ExistenceClassifier<'a> {
    pub fn new(client: &'a CompletionClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask whether `character` exists in `source_material`.
    ///
    /// Provider failures are returned as errors; an unparseable reply is not
    /// an error and yields `ExistenceVerdict::No`.
    #[tracing::instrument(name = "check_character", skip(self), fields(model = %self.model))]
    pub async fn check(
        &self,
        source_material: &str,
        character: &str,
    ) -> Result<CharacterCheck, LlmError> {
        let messages = [
            Message::system(EXISTENCE_SYSTEM_PROMPT),
            Message::user(existence_question(source_material, character)),
        ];

        let reply = self
            .client
            .complete(
                &messages,
                &self.model,
                CLASSIFIER_TEMPERATURE,
                Some(CLASSIFIER_MAX_TOKENS),
            )
            .await?;

        let check = parse_character_reply(&reply);
        tracing::info!(
            verdict = %check.verdict,
            corrected_name = ?check.corrected_name,
            "character check finished"
        );
        Ok(check)
    }
}

fn vocabulary_word(token: &str) -> Option<ExistenceVerdict> {
    token.parse().ok()
}

fn is_name_like(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '-' | '.'))
}

/// Map a free-text classifier reply onto a [`CharacterCheck`].
///
/// - a single vocabulary word gives that verdict
/// - a gender word after one to four name-like words gives the gender and
///   the name as a correction
/// - a gender word after a longer prefix keeps the gender but drops the name
/// - anything else is `No`
pub fn parse_character_reply(reply: &str) -> CharacterCheck {
    let tokens: Vec<&str> = strip_wrapping(reply)
        .split_whitespace()
        .map(strip_trailing_punctuation)
        .filter(|t| !t.is_empty())
        .collect();

    let Some((last, leading)) = tokens.split_last() else {
        tracing::warn!(reply, "empty character check reply, treating as not found");
        return CharacterCheck::not_found();
    };

    let Some(verdict) = vocabulary_word(last) else {
        tracing::warn!(reply, "ambiguous character check reply, treating as not found");
        return CharacterCheck::not_found();
    };

    if leading.is_empty() {
        return CharacterCheck {
            verdict,
            corrected_name: None,
        };
    }

    if !verdict.exists() {
        tracing::warn!(reply, "name followed by 'no', treating as not found");
        return CharacterCheck::not_found();
    }

    if leading.len() > MAX_NAME_WORDS {
        tracing::warn!(reply, "corrected name too long, keeping the requested name");
        return CharacterCheck {
            verdict,
            corrected_name: None,
        };
    }

    let name_like = leading
        .iter()
        .all(|t| is_name_like(t) && vocabulary_word(t).is_none());
    if !name_like {
        tracing::warn!(reply, "ambiguous character check reply, treating as not found");
        return CharacterCheck::not_found();
    }

    CharacterCheck {
        verdict,
        corrected_name: Some(leading.join(" ")),
    }
}
