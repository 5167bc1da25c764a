//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use vsum_models::VideoIdError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for any request whose video identifier cannot be read.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

/// Message returned for 5xx errors that carry no upstream payload.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors from the outbound summarization API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {payload}")]
    Status { status: u16, payload: String },

    #[error("Still rate limited after {attempts} attempts: {payload}")]
    RetriesExhausted { attempts: u32, payload: String },
}

impl UpstreamError {
    /// Raw body returned by the upstream, if any.
    pub fn payload(&self) -> Option<&str> {
        match self {
            UpstreamError::Status { payload, .. }
            | UpstreamError::RetriesExhausted { payload, .. } => Some(payload.as_str()),
            UpstreamError::Network(_) => None,
        }
    }
}

pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Errors from the transcript provider.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Provider refused or failed (disabled captions, unknown video, network)
    #[error("{0}")]
    Unavailable(String),
}

impl TranscriptError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid video URL: {0}")]
    InvalidVideoUrl(#[from] VideoIdError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("Summarization error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidVideoUrl(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Transcript(_) | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON value placed under `error` in the response body.
    fn error_payload(&self, hide_internal: bool) -> Value {
        match self {
            ApiError::InvalidVideoUrl(_) | ApiError::InvalidBody(_) => {
                Value::String(INVALID_URL_MESSAGE.to_string())
            }
            ApiError::Transcript(e) => Value::String(e.to_string()),
            ApiError::Upstream(e) => match e.payload() {
                Some(payload) if !payload.trim().is_empty() => serde_json::from_str(payload)
                    .unwrap_or_else(|_| Value::String(payload.to_string())),
                _ if hide_internal => Value::String(GENERIC_ERROR_MESSAGE.to_string()),
                _ => Value::String(e.to_string()),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: Value,
}

impl ApiError {
    /// Render the error, optionally replacing internal details with a generic message.
    pub fn to_response(self, hide_internal: bool) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.error_payload(hide_internal),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.to_response(false)
    }
}
