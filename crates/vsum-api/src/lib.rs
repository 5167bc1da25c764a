//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /summarize`: transcript fetch plus Gemini bullet-point summary
//! - Fixed-delay retry on upstream rate limits
//! - Health and Prometheus metrics endpoints

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shutdown;
pub mod state;

pub use config::{ApiConfig, ConfigError, GeminiConfig};
pub use error::{ApiError, ApiResult, TranscriptError, UpstreamError};
pub use routes::create_router;
pub use services::{GeminiClient, RetryPolicy, RetryingClient, TranscriptProvider};
pub use state::AppState;
