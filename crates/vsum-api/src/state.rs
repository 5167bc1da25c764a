//! Application state.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::TranscriptResult;
use crate::services::{GeminiClient, TranscriptProvider, YoutubeTranscriptProvider};

/// Shared application state.
///
/// Immutable after construction; every request gets a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub transcripts: Arc<dyn TranscriptProvider>,
    pub gemini: Arc<GeminiClient>,
}

impl AppState {
    /// Create new application state backed by the YouTube caption provider.
    pub fn new(config: ApiConfig) -> TranscriptResult<Self> {
        let provider = YoutubeTranscriptProvider::new(config.transcript_languages.clone())?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create application state with an explicit transcript provider.
    pub fn with_provider(config: ApiConfig, transcripts: Arc<dyn TranscriptProvider>) -> Self {
        let gemini = GeminiClient::new(&config.gemini);

        Self {
            config: Arc::new(config),
            transcripts,
            gemini: Arc::new(gemini),
        }
    }
}
