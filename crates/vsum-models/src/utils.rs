//! Utility functions for URL parsing.
//!
//! Extraction is intentionally literal: the identifier is whatever follows
//! the first `v=` marker, cut at the first `&`. No host or format checks are
//! made, so `extract_video_id("anything?v=abc")` yields `abc`.

use thiserror::Error;

/// Query marker that introduces the video identifier.
const VIDEO_PARAM_MARKER: &str = "v=";

/// Separator between query parameters.
const QUERY_SEPARATOR: char = '&';

/// Errors that can occur during video ID extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    /// URL has no `v=` segment at all
    #[error("URL has no v= parameter")]
    MissingVideoParam,
    /// `v=` is present but nothing follows it before `&`
    #[error("v= parameter is empty")]
    EmptyVideoId,
}

/// Result type for video ID extraction.
pub type VideoIdResult<T> = Result<T, VideoIdError>;

/// Extract the video ID from a watch URL.
///
/// Returns the substring after the first `v=` up to (not including) the
/// first `&`, or the end of the string.
///
/// ```
/// use vsum_models::extract_video_id;
///
/// let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").unwrap();
/// assert_eq!(id, "dQw4w9WgXcQ");
/// ```
pub fn extract_video_id(url: &str) -> VideoIdResult<String> {
    let (_, rest) = url
        .split_once(VIDEO_PARAM_MARKER)
        .ok_or(VideoIdError::MissingVideoParam)?;

    let id = rest.split(QUERY_SEPARATOR).next().unwrap_or_default();

    if id.is_empty() {
        return Err(VideoIdError::EmptyVideoId);
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_stops_at_first_ampersand() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&list=PL1&index=2").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_v_param_not_first() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=xyz_-9").unwrap(),
            "xyz_-9"
        );
    }

    #[test]
    fn test_uses_first_marker() {
        // `dev=` also contains the marker; extraction is literal.
        assert_eq!(
            extract_video_id("https://example.com/?dev=1&v=real").unwrap(),
            "1"
        );
    }

    #[test]
    fn test_id_is_not_validated() {
        assert_eq!(extract_video_id("v=a b c").unwrap(), "a b c");
    }

    #[test]
    fn test_missing_param() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Err(VideoIdError::MissingVideoParam)
        );
        assert_eq!(extract_video_id(""), Err(VideoIdError::MissingVideoParam));
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v="),
            Err(VideoIdError::EmptyVideoId)
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=&t=10"),
            Err(VideoIdError::EmptyVideoId)
        );
    }

    #[test]
    fn test_extracts_any_id_up_to_ampersand() {
        for id in ["a", "dQw4w9WgXcQ", "with-dash_under", "x.y"] {
            for suffix in ["", "&t=1", "&v=other&x=y"] {
                let url = format!("https://www.youtube.com/watch?v={}{}", id, suffix);
                assert_eq!(extract_video_id(&url).unwrap(), id, "url: {}", url);
            }
        }
    }
}
