//! Transcript retrieval.
//!
//! [`TranscriptProvider`] is the seam between the handler and the external
//! caption source. The production implementation talks to YouTube through
//! `yt-transcript-rs`.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;

use vsum_models::{Transcript, TranscriptFragment, VideoId};

use crate::error::{TranscriptError, TranscriptResult};
use crate::metrics;

/// Source of timed caption fragments for a video.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the ordered fragments for `video_id`.
    async fn fetch(&self, video_id: &VideoId) -> TranscriptResult<Vec<TranscriptFragment>>;
}

/// Fetch a transcript, timing the provider call.
pub async fn fetch_transcript(
    provider: &dyn TranscriptProvider,
    video_id: &VideoId,
) -> TranscriptResult<Transcript> {
    let start = Instant::now();
    let fragments = provider.fetch(video_id).await?;
    metrics::record_transcript_fetch(start.elapsed().as_secs_f64());

    if fragments.is_empty() {
        warn!(video_id = %video_id, "Provider returned an empty transcript");
    }

    info!(
        video_id = %video_id,
        fragments = fragments.len(),
        "Fetched transcript"
    );

    Ok(Transcript::new(video_id.clone(), fragments))
}

/// YouTube caption provider.
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeTranscriptProvider {
    /// Create a provider that prefers `languages` in order.
    pub fn new(languages: Vec<String>) -> TranscriptResult<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TranscriptError::unavailable(format!("Failed to initialize transcript client: {}", e))
        })?;

        Ok(Self { api, languages })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    async fn fetch(&self, video_id: &VideoId) -> TranscriptResult<Vec<TranscriptFragment>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        debug!(video_id = %video_id, languages = ?languages, "Requesting captions");

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| TranscriptError::unavailable(e.to_string()))?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| TranscriptFragment::new(s.text, s.start, s.duration))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        fragments: Vec<TranscriptFragment>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptProvider for FixedProvider {
        async fn fetch(&self, _video_id: &VideoId) -> TranscriptResult<Vec<TranscriptFragment>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fragments.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl TranscriptProvider for FailingProvider {
        async fn fetch(&self, video_id: &VideoId) -> TranscriptResult<Vec<TranscriptFragment>> {
            Err(TranscriptError::unavailable(format!(
                "Transcript is disabled on this video ({})",
                video_id
            )))
        }
    }

    #[tokio::test]
    async fn test_fetch_joins_in_order() {
        let provider = FixedProvider {
            fragments: vec![
                TranscriptFragment::new("one", 0.0, 1.0),
                TranscriptFragment::new("two", 1.0, 1.0),
                TranscriptFragment::new("three", 2.0, 1.0),
            ],
            calls: AtomicUsize::new(0),
        };
        let video_id = VideoId::new("abc").unwrap();

        let transcript = fetch_transcript(&provider, &video_id).await.unwrap();

        assert_eq!(transcript.full_text(), "one two three");
        assert_eq!(transcript.video_id, video_id);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_transcript_passes_through() {
        let provider = FixedProvider {
            fragments: vec![],
            calls: AtomicUsize::new(0),
        };
        let transcript = fetch_transcript(&provider, &VideoId::new("abc").unwrap())
            .await
            .unwrap();
        assert!(transcript.is_empty());
        assert_eq!(transcript.full_text(), "");
    }

    #[tokio::test]
    async fn test_provider_error_propagates_unchanged() {
        let result = fetch_transcript(&FailingProvider, &VideoId::new("xyz").unwrap()).await;
        match result {
            Err(TranscriptError::Unavailable(msg)) => {
                assert_eq!(msg, "Transcript is disabled on this video (xyz)")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
