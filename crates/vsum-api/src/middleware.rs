//! API middleware.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response};
use axum::middleware::Next;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create CORS layer.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        // Wildcard origin - no credentials allowed, can use Any
        CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any)
            .max_age(Duration::from_secs(600))
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
            .allow_origin(origins)
            .max_age(Duration::from_secs(600))
    }
}

/// Request ID middleware.
///
/// Everything logged further down the stack runs inside a `request` span
/// carrying the ID.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response<Body> {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(request_id.clone());

    let span = info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Request logging middleware.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request.extensions().get::<String>().cloned().unwrap_or_default();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    // Skip health check logging
    if uri.path() != "/health" && uri.path() != "/healthz" {
        info!(
            method = %method,
            uri = %uri,
            status = %status,
            request_id = %request_id,
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_request_id_is_attached_to_handler_logs() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = Router::new()
            .route(
                "/ping",
                get(|| async {
                    info!("handled ping");
                    "pong"
                }),
            )
            .layer(middleware::from_fn(request_id));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");

        let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("handled ping"));
        assert!(logs.contains("request_id=req-42"));
    }

    #[tokio::test]
    async fn test_request_id_is_generated_when_absent() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(request_id));

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
