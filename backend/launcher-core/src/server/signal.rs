use std::future::pending;
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Notify;

/// Resolves on a programmatic stop or a termination signal, whichever is first.
pub(crate) async fn stop_requested(stop: Arc<Notify>) {
    tokio::select! {
        _ = stop.notified() => info!("Stopping server: shutdown requested"),
        _ = termination() => info!("Stopping server: termination signal received"),
    }
}

async fn termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
