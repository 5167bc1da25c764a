//! Gemini `generateContent` wire types.
//!
//! The request is the minimal `{ contents: [{ parts: [{ text }] }] }` shape.
//! Every level of the response is optional so that a partial or unexpected
//! body still deserializes and falls back to [`SUMMARY_PLACEHOLDER`].

use serde::{Deserialize, Serialize};

/// Instruction prepended to the transcript text.
pub const SUMMARY_PROMPT_PREFIX: &str = "Summarize this transcript in bullet points: ";

/// Summary returned when the response carries no candidate text.
pub const SUMMARY_PLACEHOLDER: &str = "No summary available";

/// Build the summarization prompt for a transcript.
pub fn build_summary_prompt(transcript_text: &str) -> String {
    format!("{}{}", SUMMARY_PROMPT_PREFIX, transcript_text)
}

// ============================================================================
// Request
// ============================================================================

/// Gemini API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Gemini API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of `candidates[0].content.parts[0]`, if present and non-empty.
    pub fn summary_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Summary text or [`SUMMARY_PLACEHOLDER`].
    pub fn summary_or_placeholder(&self) -> String {
        self.summary_text().unwrap_or(SUMMARY_PLACEHOLDER).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::from_prompt(build_summary_prompt("a b c"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [
                    { "parts": [ { "text": "Summarize this transcript in bullet points: a b c" } ] }
                ]
            })
        );
    }

    #[test]
    fn test_summary_text_well_formed() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": { "parts": [ { "text": "- point one\n- point two" }, { "text": "ignored" } ], "role": "model" },
                    "finishReason": "STOP"
                },
                { "content": { "parts": [ { "text": "second candidate" } ] } }
            ],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();

        assert_eq!(response.summary_text(), Some("- point one\n- point two"));
        assert_eq!(response.summary_or_placeholder(), "- point one\n- point two");
    }

    #[test]
    fn test_placeholder_when_path_missing() {
        let bodies = [
            json!({}),
            json!({ "candidates": null }),
            json!({ "candidates": [] }),
            json!({ "candidates": [ {} ] }),
            json!({ "candidates": [ { "content": {} } ] }),
            json!({ "candidates": [ { "content": { "parts": [] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": "" } ] } } ] }),
        ];

        for body in bodies {
            let response: GenerateContentResponse = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(response.summary_or_placeholder(), SUMMARY_PLACEHOLDER, "body: {}", body);
        }
    }
}
