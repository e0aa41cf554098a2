//! Conversation startup: the existence check, then the persona.

use charchat_types::chat::CharacterRequest;
use charchat_types::config::PersonaOptions;
use charchat_types::llm::LlmError;
use charchat_types::verdict::CharacterCheck;

use super::conversation::Conversation;
use crate::classify::ExistenceClassifier;
use crate::llm::client::CompletionClient;
use crate::persona::{PersonaContext, persona_message};

/// A verified character and the conversation ready to run with it.
#[derive(Debug, Clone)]
pub struct ConversationStart {
    pub check: CharacterCheck,
    pub conversation: Conversation,
}

/// Verify the requested character and build its conversation.
///
/// Returns `Ok(None)` when the classifier says the character does not exist
/// in the source material. Provider failures are returned as errors.
#[tracing::instrument(
    skip(client, request, options),
    fields(source = %request.source_material, character = %request.character)
)]
pub async fn start_conversation(
    client: &CompletionClient,
    classifier_model: &str,
    request: &CharacterRequest,
    options: PersonaOptions,
) -> Result<Option<ConversationStart>, LlmError> {
    let check = ExistenceClassifier::new(client, classifier_model)
        .check(&request.source_material, &request.character)
        .await?;

    if !check.verdict.exists() {
        tracing::info!("character not found, not starting a conversation");
        return Ok(None);
    }

    let character = check.display_name(&request.character).to_string();
    let persona = persona_message(
        &PersonaContext {
            character: &character,
            source_material: &request.source_material,
            gender: check.verdict,
            setting: request.setting.as_deref(),
        },
        options,
    );

    Ok(Some(ConversationStart {
        conversation: Conversation::new(character, persona),
        check,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::conversation::ConversationState;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::client::DEFAULT_TIMEOUT;
    use crate::testing::{ScriptedProvider, Step};
    use charchat_types::llm::MessageRole;
    use charchat_types::verdict::ExistenceVerdict;

    fn client(provider: &ScriptedProvider) -> CompletionClient {
        CompletionClient::new(BoxLlmProvider::new(provider.clone()), DEFAULT_TIMEOUT)
    }

    #[tokio::test]
    async fn test_unknown_character_never_starts_conversation() {
        let provider = ScriptedProvider::new(["no"]);
        let client = client(&provider);
        let request = CharacterRequest::new("Die Hard", "Hermione", None);

        let start = start_conversation(&client, "classifier-model", &request, PersonaOptions::default())
            .await
            .unwrap();

        assert!(start.is_none());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_known_character_gets_persona_with_corrected_name() {
        let provider = ScriptedProvider::new(["Hermione Granger female"]);
        let client = client(&provider);
        let request = CharacterRequest::new(
            "Harry Potter",
            "hermione",
            Some("The Gryffindor common room".to_string()),
        );

        let start = start_conversation(&client, "classifier-model", &request, PersonaOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(start.check.verdict, ExistenceVerdict::Female);
        assert_eq!(start.conversation.character(), "Hermione Granger");
        assert_eq!(start.conversation.state(), ConversationState::AwaitingInput);

        let transcript = start.conversation.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, MessageRole::System);
        assert!(transcript[0].content.contains("Hermione Granger"));
        assert!(transcript[0].content.contains("Gryffindor common room"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error() {
        let provider = ScriptedProvider::from_steps([Step::Fail("HTTP 401".to_string())]);
        let client = client(&provider);
        let request = CharacterRequest::new("Harry Potter", "Hermione", None);

        let result =
            start_conversation(&client, "classifier-model", &request, PersonaOptions::default()).await;
        assert!(matches!(result, Err(LlmError::Provider { .. })));
    }
}
