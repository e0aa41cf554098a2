//! TranscriptSink port: line-by-line persistence of a conversation.

use std::future::Future;

use charchat_types::error::TranscriptError;

/// Speaker label used for the user's lines.
pub const USER_SPEAKER: &str = "You";

/// Append-only transcript storage with a final keep-or-discard decision.
pub trait TranscriptSink: Send {
    /// Whether lines are still being recorded.
    fn is_active(&self) -> bool;

    /// Append one `"<speaker>: <text>"` line.
    fn append(
        &mut self,
        speaker: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), TranscriptError>> + Send;

    /// Close the transcript, keeping it or deleting it.
    fn finish(&mut self, keep: bool) -> impl Future<Output = Result<(), TranscriptError>> + Send;
}

/// `None` is a sink that records nothing (saving disabled).
impl<T: TranscriptSink> TranscriptSink for Option<T> {
    fn is_active(&self) -> bool {
        self.as_ref().is_some_and(TranscriptSink::is_active)
    }

    async fn append(&mut self, speaker: &str, text: &str) -> Result<(), TranscriptError> {
        match self {
            Some(sink) => sink.append(speaker, text).await,
            None => Ok(()),
        }
    }

    async fn finish(&mut self, keep: bool) -> Result<(), TranscriptError> {
        match self {
            Some(sink) => sink.finish(keep).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryTranscript;

    #[tokio::test]
    async fn test_none_is_inactive_noop() {
        let mut sink: Option<MemoryTranscript> = None;
        assert!(!sink.is_active());
        sink.append(USER_SPEAKER, "hello").await.unwrap();
        sink.finish(true).await.unwrap();
    }

    #[tokio::test]
    async fn test_some_delegates() {
        let mut sink = Some(MemoryTranscript::default());
        assert!(sink.is_active());
        sink.append(USER_SPEAKER, "hello").await.unwrap();
        sink.finish(false).await.unwrap();

        let inner = sink.unwrap();
        assert_eq!(inner.lines, vec!["You: hello"]);
        assert_eq!(inner.kept, Some(false));
    }
}
