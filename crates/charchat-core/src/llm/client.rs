//! CompletionClient -- the one call every component goes through.
//!
//! Wraps a [`BoxLlmProvider`] with the checks the provider itself does not
//! make: the temperature range, the provider's output limit, an explicit
//! per-call timeout, and rejection of blank generations. There is no retry here; a failed call is surfaced to the
//! caller unchanged.

use std::time::Duration;

use charchat_types::llm::{CompletionRequest, LlmError, Message};

use super::box_provider::BoxLlmProvider;

/// Valid sampling temperature range accepted by OpenAI-compatible APIs.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends role-tagged message lists to a provider and returns the reply text.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one completion and return the trimmed reply text.
    ///
    /// `max_tokens` is clamped to the provider's output limit. Fails with
    /// `InvalidRequest` for a temperature outside `[0, 2]` (no network call
    /// is made), `Timeout` when the provider does not answer in time, and
    /// `EmptyResponse` when the reply is blank.
    #[tracing::instrument(
        name = "complete",
        skip(self, messages),
        fields(provider = %self.provider.name(), messages = messages.len())
    )]
    pub async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature {temperature} is outside [0, 2]"
            )));
        }

        let output_limit = self.provider.capabilities().max_output_tokens;
        if max_tokens.is_some_and(|cap| cap > output_limit) {
            tracing::debug!(?max_tokens, output_limit, "clamping reply cap to provider limit");
        }

        let request = CompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            max_tokens: max_tokens.map(|cap| cap.min(output_limit)),
            temperature: Some(temperature),
        };

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| LlmError::Timeout {
                secs: self.timeout.as_secs(),
            })??;

        let text = response.content.trim();
        if text.is_empty() {
            tracing::debug!(stop_reason = %response.stop_reason, "provider returned blank text");
            return Err(LlmError::EmptyResponse);
        }

        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion finished"
        );

        Ok(text.to_string())
    }
}
