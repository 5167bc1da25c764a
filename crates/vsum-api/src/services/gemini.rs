//! Gemini AI client for transcript summarization.
//!
//! Sends a single-turn `generateContent` request through the
//! [`RetryingClient`] and pulls the first candidate's text out of the reply.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tracing::{info, warn};

use vsum_models::{build_summary_prompt, GenerateContentRequest, GenerateContentResponse};

use crate::config::GeminiConfig;
use crate::error::UpstreamResult;
use crate::services::retry::{RetryPolicy, RetryingClient};

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    endpoint: String,
    http: RetryingClient,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: &GeminiConfig) -> Self {
        let policy = RetryPolicy::new(config.max_attempts, config.default_retry_after);

        Self {
            api_key: config.api_key.clone(),
            endpoint: config.endpoint(),
            http: RetryingClient::new(Client::new(), policy, config.timeout),
        }
    }

    /// Summarize a transcript as bullet points.
    ///
    /// Returns the placeholder summary when the reply has no candidate text.
    pub async fn summarize(&self, transcript_text: &str) -> UpstreamResult<String> {
        let request = GenerateContentRequest::from_prompt(build_summary_prompt(transcript_text));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        info!(
            endpoint = %self.endpoint,
            prompt_chars = transcript_text.len(),
            "Requesting summary from Gemini"
        );

        let response = self
            .http
            .post_json(&self.request_url(), &request, &headers)
            .await?;

        let body = response.text().await.map_err(|e| e.without_url())?;

        Ok(parse_summary(&body))
    }

    fn request_url(&self) -> String {
        format!("{}?key={}", self.endpoint, self.api_key)
    }
}

/// Extract the summary from a `generateContent` body.
///
/// A body that is not valid JSON is treated like one missing the
/// candidate path.
pub fn parse_summary(body: &str) -> String {
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(error = %e, "Gemini response was not valid JSON");
        GenerateContentResponse::default()
    });

    if response.summary_text().is_none() {
        warn!("Gemini response had no candidate text");
    }

    response.summary_or_placeholder()
}
