//! In-memory test doubles for the core ports.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use charchat_types::error::TranscriptError;
use charchat_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::chat::console::{ChatConsole, ConsoleInput, ConsoleLine};
use crate::chat::transcript::TranscriptSink;
use crate::llm::provider::LlmProvider;

/// One scripted provider reaction.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Reply(String),
    Fail(String),
    Hang(Duration),
}

/// Provider that replays a fixed script and records every request.
///
/// Clones share the same script and request log, so a test can keep one
/// handle while a boxed clone is handed to the code under test.
#[derive(Clone)]
pub(crate) struct ScriptedProvider {
    steps: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    capabilities: ProviderCapabilities,
}

impl ScriptedProvider {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_steps(replies.into_iter().map(|r| Step::Reply(r.into())))
    }

    pub(crate) fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
            capabilities: ProviderCapabilities {
                max_output_tokens: 4_096,
            },
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Reply(content)) => Ok(CompletionResponse {
                id: "scripted-1".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            }),
            Some(Step::Fail(message)) => Err(LlmError::Provider { message }),
            Some(Step::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                Err(LlmError::Provider {
                    message: "woke up after hanging".to_string(),
                })
            }
            None => Err(LlmError::Provider {
                message: "script exhausted".to_string(),
            }),
        }
    }
}

/// Console that feeds scripted input lines and records everything shown.
#[derive(Default)]
pub(crate) struct ScriptedConsole {
    inputs: VecDeque<ConsoleInput>,
    pub(crate) shown: Vec<ConsoleLine>,
    pub(crate) confirm_answer: bool,
    pub(crate) confirm_asked: u32,
}

impl ScriptedConsole {
    pub(crate) fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines
                .into_iter()
                .map(|l| ConsoleInput::Line(l.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn replies(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|line| match line {
                ConsoleLine::Reply { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ChatConsole for ScriptedConsole {
    async fn read_line(&mut self) -> ConsoleInput {
        self.inputs.pop_front().unwrap_or(ConsoleInput::Closed)
    }

    fn show(&mut self, line: ConsoleLine) {
        self.shown.push(line);
    }

    async fn confirm(&mut self, _question: &str) -> bool {
        self.confirm_asked += 1;
        self.confirm_answer
    }
}

/// Transcript sink that keeps lines in memory.
#[derive(Default)]
pub(crate) struct MemoryTranscript {
    pub(crate) lines: Vec<String>,
    pub(crate) kept: Option<bool>,
}

impl TranscriptSink for MemoryTranscript {
    fn is_active(&self) -> bool {
        self.kept.is_none()
    }

    async fn append(&mut self, speaker: &str, text: &str) -> Result<(), TranscriptError> {
        if self.kept.is_some() {
            return Err(TranscriptError::Finished);
        }
        self.lines.push(format!("{speaker}: {text}"));
        Ok(())
    }

    async fn finish(&mut self, keep: bool) -> Result<(), TranscriptError> {
        self.kept = Some(keep);
        Ok(())
    }
}
