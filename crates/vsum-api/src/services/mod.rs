//! Outbound services used by the request handlers.

pub mod gemini;
pub mod retry;
pub mod transcript;

pub use gemini::GeminiClient;
pub use retry::{RetryDecision, RetryPolicy, RetryingClient};
pub use transcript::{fetch_transcript, TranscriptProvider, YoutubeTranscriptProvider};
