//! Axum API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsum_api::shutdown::shutdown_signal;
use vsum_api::{create_router, metrics, ApiConfig, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for rustls 0.23+); a provider
    // installed by a dependency first is fine too.
    let _ = rustls::crypto::ring::default_provider().install_default();

    info!("Starting vsum-api");

    let config = ApiConfig::from_env()?;
    info!(
        host = %config.host,
        port = config.port,
        model = %config.gemini.model,
        max_attempts = config.gemini.max_attempts,
        "API config loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics().context("Failed to install Prometheus recorder")?)
    } else {
        None
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;

    let state = AppState::new(config).context("Failed to create application state")?;
    let app = create_router(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on port {}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vsum=info,vsum_api=info,vsum_models=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
