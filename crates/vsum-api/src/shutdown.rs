//! Graceful shutdown.

use std::future::Future;
use std::io;

use tracing::{error, info};

/// Resolve when the process receives Ctrl+C.
pub async fn shutdown_signal() {
    wait_for(tokio::signal::ctrl_c()).await
}

/// Resolve once `signal` fires. If the listener cannot be installed this
/// never resolves, so the server keeps running.
pub async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
