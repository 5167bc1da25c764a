//! `/summarize` request and response bodies.

use serde::{Deserialize, Serialize};

/// Request to summarize a video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Watch URL carrying a `v=` parameter
    #[serde(rename = "youtubeUrl", default)]
    pub youtube_url: Option<String>,
}

impl SummarizeRequest {
    pub fn new(youtube_url: impl Into<String>) -> Self {
        Self {
            youtube_url: Some(youtube_url.into()),
        }
    }
}

/// Successful summarization result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}
