//! The conversation state machine and the loop that drives it.
//!
//! `Conversation` owns the transcript and enforces its shape: the persona
//! system message at index 0 followed by alternating user/assistant pairs.
//! `ConversationLoop` moves a conversation through
//! `AwaitingInput -> GeneratingReply -> ClassifyingEnd -> AwaitingInput`
//! until it reaches `Terminated`.

use charchat_types::chat::Termination;
use charchat_types::llm::{Message, MessageRole};
use charchat_types::verdict::GoodbyeVerdict;

use super::command::{ChatCommand, UserInput, parse_input};
use super::console::{ChatConsole, ConsoleInput, ConsoleLine};
use super::transcript::{TranscriptSink, USER_SPEAKER};
use crate::classify::GoodbyeClassifier;
use crate::llm::client::CompletionClient;

/// Where the conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingInput,
    GeneratingReply,
    ClassifyingEnd,
    Terminated(Termination),
}

/// A single conversation with one character.
#[derive(Debug, Clone)]
pub struct Conversation {
    character: String,
    transcript: Vec<Message>,
    state: ConversationState,
    turns: u32,
}

impl Conversation {
    pub fn new(character: impl Into<String>, persona: Message) -> Self {
        debug_assert_eq!(persona.role, MessageRole::System);
        Self {
            character: character.into(),
            transcript: vec![persona],
            state: ConversationState::AwaitingInput,
            turns: 0,
        }
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    /// The full message list sent to the provider.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Number of completed user/assistant exchanges.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            ConversationState::Terminated(termination) => Some(termination),
            _ => None,
        }
    }

    /// The latest assistant reply, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.transcript
            .last()
            .filter(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }

    /// `(speaker, text)` pairs for every user and assistant message.
    pub fn history(&self) -> Vec<(String, String)> {
        self.transcript
            .iter()
            .filter_map(|m| match m.role {
                MessageRole::System => None,
                MessageRole::User => Some((USER_SPEAKER.to_string(), m.content.clone())),
                MessageRole::Assistant => Some((self.character.clone(), m.content.clone())),
            })
            .collect()
    }

    /// Add a user message and move to `GeneratingReply`.
    pub fn accept_input(&mut self, text: impl Into<String>) {
        debug_assert_eq!(self.state, ConversationState::AwaitingInput);
        self.transcript.push(Message::user(text));
        self.state = ConversationState::GeneratingReply;
    }

    /// Add the character's reply and move to `ClassifyingEnd`.
    pub fn record_reply(&mut self, text: impl Into<String>) {
        debug_assert_eq!(self.state, ConversationState::GeneratingReply);
        self.transcript.push(Message::assistant(text));
        self.turns += 1;
        self.state = ConversationState::ClassifyingEnd;
    }

    /// Undo the pending user message after a failed generation.
    pub fn rollback_turn(&mut self) {
        debug_assert_eq!(self.state, ConversationState::GeneratingReply);
        if self
            .transcript
            .last()
            .is_some_and(|m| m.role == MessageRole::User)
        {
            self.transcript.pop();
        }
        self.state = ConversationState::AwaitingInput;
    }

    /// Act on the goodbye check of the latest reply.
    pub fn apply_verdict(&mut self, verdict: GoodbyeVerdict) {
        debug_assert_eq!(self.state, ConversationState::ClassifyingEnd);
        self.state = if verdict.ends_conversation() {
            ConversationState::Terminated(Termination::CharacterEnded {
                angry: verdict == GoodbyeVerdict::AngryGoodbye,
            })
        } else {
            ConversationState::AwaitingInput
        };
    }

    pub fn terminate(&mut self, termination: Termination) {
        self.state = ConversationState::Terminated(termination);
    }
}

/// Generation parameters for in-character replies.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

/// How a finished conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub termination: Termination,
    pub turns: u32,
    /// `None` when no transcript was being recorded.
    pub transcript_kept: Option<bool>,
}

/// Question asked once at the end of a recorded session.
pub const KEEP_TRANSCRIPT_QUESTION: &str = "Keep the transcript?";

/// Drives a [`Conversation`] against a console, a provider and a transcript sink.
pub struct ConversationLoop<'a> {
    client: &'a CompletionClient,
    goodbye: GoodbyeClassifier<'a>,
    settings: ReplySettings,
}

impl<'a> ConversationLoop<'a> {
    pub fn new(
        client: &'a CompletionClient,
        goodbye: GoodbyeClassifier<'a>,
        settings: ReplySettings,
    ) -> Self {
        Self {
            client,
            goodbye,
            settings,
        }
    }

    /// Run until the conversation terminates, then settle the transcript.
    pub async fn run<C, S>(
        &self,
        conversation: &mut Conversation,
        console: &mut C,
        sink: &mut S,
    ) -> SessionOutcome
    where
        C: ChatConsole,
        S: TranscriptSink,
    {
        let termination = loop {
            match conversation.state() {
                ConversationState::AwaitingInput => {
                    self.await_input(conversation, console).await;
                }
                ConversationState::GeneratingReply => {
                    self.generate_reply(conversation, console, sink).await;
                }
                ConversationState::ClassifyingEnd => {
                    self.classify_end(conversation, console).await;
                }
                ConversationState::Terminated(termination) => break termination,
            }
        };

        tracing::info!(?termination, turns = conversation.turns(), "conversation ended");

        let transcript_kept = if sink.is_active() {
            let keep = console.confirm(KEEP_TRANSCRIPT_QUESTION).await;
            if let Err(e) = sink.finish(keep).await {
                tracing::warn!(error = %e, "failed to finish transcript");
            }
            Some(keep)
        } else {
            None
        };

        SessionOutcome {
            termination,
            turns: conversation.turns(),
            transcript_kept,
        }
    }

    async fn await_input<C: ChatConsole>(&self, conversation: &mut Conversation, console: &mut C) {
        let line = match console.read_line().await {
            ConsoleInput::Line(line) => line,
            ConsoleInput::Closed => {
                conversation.terminate(Termination::InputClosed);
                return;
            }
        };

        match parse_input(&line) {
            UserInput::Empty => {}
            UserInput::Quit => conversation.terminate(Termination::UserQuit),
            UserInput::Command(ChatCommand::Help) => console.show(ConsoleLine::Help),
            UserInput::Command(ChatCommand::History) => {
                console.show(ConsoleLine::History(conversation.history()));
            }
            UserInput::Command(ChatCommand::Unknown(cmd)) => {
                console.show(ConsoleLine::UnknownCommand(cmd));
            }
            UserInput::Message(text) => conversation.accept_input(text),
        }
    }

    async fn generate_reply<C, S>(&self, conversation: &mut Conversation, console: &mut C, sink: &mut S)
    where
        C: ChatConsole,
        S: TranscriptSink,
    {
        let result = self
            .client
            .complete(
                conversation.transcript(),
                &self.settings.model,
                self.settings.temperature,
                self.settings.max_tokens,
            )
            .await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "reply generation failed, rolling back turn");
                conversation.rollback_turn();
                console.show(ConsoleLine::TurnFailed {
                    error: e.to_string(),
                    retryable: e.is_retryable(),
                });
                return;
            }
        };

        let user_text = conversation
            .transcript()
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        conversation.record_reply(reply.clone());

        console.show(ConsoleLine::Reply {
            speaker: conversation.character().to_string(),
            text: reply.clone(),
        });

        if sink.is_active() {
            let written = match sink.append(USER_SPEAKER, &user_text).await {
                Ok(()) => sink.append(conversation.character(), &reply).await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                tracing::warn!(error = %e, "transcript write failed, continuing without saving");
                if let Err(e) = sink.finish(false).await {
                    tracing::warn!(error = %e, "failed to discard partial transcript");
                }
            }
        }
    }

    async fn classify_end<C: ChatConsole>(&self, conversation: &mut Conversation, console: &mut C) {
        let reply = conversation.last_reply().unwrap_or_default().to_string();

        let verdict = match self.goodbye.classify(&reply).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(error = %e, "goodbye check failed, continuing");
                GoodbyeVerdict::Continue
            }
        };

        conversation.apply_verdict(verdict);
        if let Some(termination) = conversation.termination() {
            console.show(ConsoleLine::Farewell {
                speaker: conversation.character().to_string(),
                angry: termination.is_angry(),
            });
        }
    }
}
