//! Video identifier model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{extract_video_id, VideoIdError, VideoIdResult};

/// Identifier of a video on the transcript provider.
///
/// Never empty: the only constructors go through [`extract_video_id`] or
/// reject blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Parse the identifier out of a watch URL.
    pub fn from_url(url: &str) -> VideoIdResult<Self> {
        extract_video_id(url).map(Self)
    }

    /// Wrap a bare identifier.
    pub fn new(id: impl Into<String>) -> VideoIdResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(VideoIdError::EmptyVideoId);
        }
        Ok(Self(id))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
