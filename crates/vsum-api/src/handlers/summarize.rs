//! Summarization handler.
//!
//! One request runs the whole pipeline: extract the video ID, fetch the
//! transcript, ask Gemini for bullet points. Any failure aborts the request;
//! there is no partial or fallback summary.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, instrument};

use vsum_models::{SummarizeRequest, SummarizeResponse, VideoId, SUMMARY_PLACEHOLDER};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::services::fetch_transcript;
use crate::state::AppState;

/// Summarize the transcript of the video named by `youtubeUrl`.
pub async fn summarize(
    State(state): State<AppState>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let hide_internal = state.config.is_production();

    match run_summarize(&state, body).await {
        Ok(response) => {
            let result = if response.summary == SUMMARY_PLACEHOLDER {
                "placeholder"
            } else {
                "ok"
            };
            metrics::record_summary(result);
            Json(response).into_response()
        }
        Err(e) => {
            metrics::record_summary("error");
            e.to_response(hide_internal)
        }
    }
}

#[instrument(skip_all, fields(video_id = tracing::field::Empty))]
async fn run_summarize(
    state: &AppState,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> ApiResult<SummarizeResponse> {
    let Json(request) = body?;

    let url = request.youtube_url.unwrap_or_default();
    let video_id = VideoId::from_url(&url)?;
    tracing::Span::current().record("video_id", video_id.as_str());

    let transcript = fetch_transcript(state.transcripts.as_ref(), &video_id).await?;
    let full_text = transcript.full_text();

    let summary = state.gemini.summarize(&full_text).await?;

    info!(
        fragments = transcript.len(),
        summary_chars = summary.len(),
        "Summary generated"
    );

    Ok(SummarizeResponse { summary })
}
