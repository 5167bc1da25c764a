//! Shared data models for the vsum summarization service.
//!
//! This crate provides Serde-serializable types for:
//! - Video identifiers parsed from watch URLs
//! - Transcript fragments and their concatenation
//! - Gemini `generateContent` request/response payloads
//! - The public `/summarize` request and response bodies

pub mod gemini;
pub mod summarize;
pub mod transcript;
pub mod utils;
pub mod video;

// Re-export common types
pub use gemini::{
    build_summary_prompt, GenerateContentRequest, GenerateContentResponse, SUMMARY_PLACEHOLDER,
    SUMMARY_PROMPT_PREFIX,
};
pub use summarize::{SummarizeRequest, SummarizeResponse};
pub use transcript::{join_fragments, Transcript, TranscriptFragment};
pub use utils::{extract_video_id, VideoIdError, VideoIdResult};
pub use video::VideoId;
