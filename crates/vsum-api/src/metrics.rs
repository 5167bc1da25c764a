//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vsum_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vsum_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vsum_http_requests_in_flight";

    // Upstream (summarization API) metrics
    pub const UPSTREAM_REQUESTS_TOTAL: &str = "vsum_upstream_requests_total";
    pub const UPSTREAM_RETRIES_TOTAL: &str = "vsum_upstream_retries_total";

    // Pipeline metrics
    pub const TRANSCRIPT_FETCH_DURATION_SECONDS: &str = "vsum_transcript_fetch_duration_seconds";
    pub const SUMMARIES_TOTAL: &str = "vsum_summaries_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one upstream attempt by outcome (success, rate_limited, error).
pub fn record_upstream_request(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::UPSTREAM_REQUESTS_TOTAL, &labels).increment(1);
}

/// Record a retry after a rate-limited upstream attempt.
pub fn record_upstream_retry() {
    counter!(names::UPSTREAM_RETRIES_TOTAL).increment(1);
}

/// Record transcript fetch duration.
pub fn record_transcript_fetch(duration_secs: f64) {
    histogram!(names::TRANSCRIPT_FETCH_DURATION_SECONDS).record(duration_secs);
}

/// Record a finished summarization request by result (ok, placeholder, error).
pub fn record_summary(result: &str) {
    let labels = [("result", result.to_string())];
    counter!(names::SUMMARIES_TOTAL, &labels).increment(1);
}

/// Collapse unknown paths so scanners can't blow up label cardinality.
fn sanitize_path(path: &str) -> String {
    match path {
        "/summarize" | "/health" | "/healthz" | "/metrics" => path.to_string(),
        _ => "/:unmatched".to_string(),
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    // Increment in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    // Decrement in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/summarize"), "/summarize");
        assert_eq!(sanitize_path("/health"), "/health");
        assert_eq!(sanitize_path("/wp-admin/setup.php"), "/:unmatched");
    }
}
