//! Transcript models.

use serde::{Deserialize, Serialize};

use crate::video::VideoId;

/// One timed caption entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub text: String,
    /// Offset from the start of the video (seconds)
    pub start: f64,
    /// Display duration (seconds)
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Ordered transcript of a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub fragments: Vec<TranscriptFragment>,
}

impl Transcript {
    pub fn new(video_id: VideoId, fragments: Vec<TranscriptFragment>) -> Self {
        Self {
            video_id,
            fragments,
        }
    }

    /// Concatenated fragment texts in provider order.
    pub fn full_text(&self) -> String {
        join_fragments(&self.fragments)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

/// Join fragment texts with a single space, preserving order.
///
/// Fragment text is used verbatim; no trimming or whitespace collapsing.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
