//! Goodbye classifier.
//!
//! After every in-character reply the classifier model decides whether the
//! character just ended the conversation, and whether it did so angrily.

use charchat_types::llm::{LlmError, Message};
use charchat_types::verdict::GoodbyeVerdict;

use super::{CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE, strip_trailing_punctuation, strip_wrapping};
use crate::llm::client::CompletionClient;

/// System prompt for the goodbye check, with worked examples.
pub const GOODBYE_SYSTEM_PROMPT: &str = r#"You read one line spoken by a fictional character in a conversation and decide whether the character is ending the conversation.

Answer with exactly one of:
- "continue" if the character expects the conversation to go on
- "goodbye" if the character is leaving or ending the conversation on good terms
- "angry goodbye" if the character is leaving or ending the conversation in anger

Examples:
```Fascinating! Tell me more about these "cars" of yours.``` -> continue
```It was lovely talking to you. Farewell, friend!``` -> goodbye
```I must go now, the Council awaits. Until we meet again.``` -> goodbye
```Enough of your insolence! I'm leaving.``` -> angry goodbye
```I'm done talking to you. Goodbye.``` -> angry goodbye
```Goodbye is such a sad word, isn't it? Where are you from?``` -> continue

Do not add any other text."#;

/// Wrap a character reply for the goodbye check.
pub fn goodbye_question(reply: &str) -> String {
    format!("```{reply}```")
}

/// Runs the goodbye check against the classifier model.
pub struct GoodbyeClassifier<'a> {
    client: &'a CompletionClient,
    model: String,
}

impl<'a> GoodbyeClassifier<'a> {
    pub fn new(client: &'a CompletionClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Classify the latest character reply.
    #[tracing::instrument(name = "classify_goodbye", skip(self, reply), fields(model = %self.model))]
    pub async fn classify(&self, reply: &str) -> Result<GoodbyeVerdict, LlmError> {
        let messages = [
            Message::system(GOODBYE_SYSTEM_PROMPT),
            Message::user(goodbye_question(reply)),
        ];

        let answer = self
            .client
            .complete(
                &messages,
                &self.model,
                CLASSIFIER_TEMPERATURE,
                Some(CLASSIFIER_MAX_TOKENS),
            )
            .await?;

        let verdict = parse_goodbye_reply(&answer);
        tracing::debug!(%verdict, "goodbye check finished");
        Ok(verdict)
    }
}

/// Map a free-text classifier reply onto a [`GoodbyeVerdict`].
///
/// Fails open: anything other than the three known answers is `Continue`.
pub fn parse_goodbye_reply(reply: &str) -> GoodbyeVerdict {
    let normalized = strip_trailing_punctuation(strip_wrapping(reply))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match normalized.as_str() {
        "continue" => GoodbyeVerdict::Continue,
        "goodbye" => GoodbyeVerdict::Goodbye,
        "angry goodbye" => GoodbyeVerdict::AngryGoodbye,
        _ => {
            tracing::warn!(reply, "ambiguous goodbye check reply, continuing");
            GoodbyeVerdict::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::client::DEFAULT_TIMEOUT;
    use crate::testing::ScriptedProvider;

    #[test]
    fn test_parse_known_answers() {
        assert_eq!(parse_goodbye_reply("continue"), GoodbyeVerdict::Continue);
        assert_eq!(parse_goodbye_reply("Goodbye"), GoodbyeVerdict::Goodbye);
        assert_eq!(parse_goodbye_reply("goodbye."), GoodbyeVerdict::Goodbye);
        assert_eq!(parse_goodbye_reply("ANGRY GOODBYE"), GoodbyeVerdict::AngryGoodbye);
        assert_eq!(parse_goodbye_reply("\"angry   goodbye\"\n"), GoodbyeVerdict::AngryGoodbye);
    }

    #[test]
    fn test_parse_unknown_fails_open() {
        for reply in ["", "maybe", "good bye", "sad goodbye", "the character says goodbye"] {
            assert_eq!(parse_goodbye_reply(reply), GoodbyeVerdict::Continue, "{reply:?}");
        }
    }

    #[test]
    fn test_goodbye_question_wraps_in_backticks() {
        assert_eq!(goodbye_question("Farewell."), "```Farewell.```");
    }

    #[test]
    fn test_system_prompt_lists_answers() {
        assert!(GOODBYE_SYSTEM_PROMPT.contains("\"continue\""));
        assert!(GOODBYE_SYSTEM_PROMPT.contains("\"goodbye\""));
        assert!(GOODBYE_SYSTEM_PROMPT.contains("\"angry goodbye\""));
    }

    #[tokio::test]
    async fn test_classify_angry_goodbye() {
        let provider = ScriptedProvider::new(["angry goodbye"]);
        let client = CompletionClient::new(BoxLlmProvider::new(provider.clone()), DEFAULT_TIMEOUT);
        let classifier = GoodbyeClassifier::new(&client, "classifier-model");

        let verdict = classifier
            .classify("I'm done talking to you. Goodbye.")
            .await
            .unwrap();
        assert_eq!(verdict, GoodbyeVerdict::AngryGoodbye);

        let requests = provider.requests();
        let request = &requests[0];
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(
            request.messages[1].content,
            "```I'm done talking to you. Goodbye.```"
        );
    }
}
