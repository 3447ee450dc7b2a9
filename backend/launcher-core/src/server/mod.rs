//! Embedded HTTP server hosting the Solr bundle.
//!
//! The server binds every interface on the negotiated port, mounts the bundle
//! at a fixed path and exposes a token-protected `POST /shutdown` for local
//! callers. It also stops on SIGINT/SIGTERM so the instance lock is released
//! on external termination.

mod handle;
mod routes;
mod signal;

pub use handle::RunningServer;

use crate::LOOPBACK_BASE_URL;
use crate::error::server::ServerError;
use crate::port::bind_exclusive;
use routes::{ServerState, build_router};

use common::{ErrorLocation, ShutdownSecret};

use std::net::SocketAddr;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, info, trace};
use reqwest::Client;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::sleep as TokioSleep;

const LISTEN_BACKLOG: u32 = 1024;
const READINESS_MAX_ELAPSED: Duration = Duration::from_secs(20);
const READINESS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub port: u16,
    /// Solr home directory.
    pub home: PathBuf,
    /// Exploded bundle directory or a single bundle file.
    pub bundle: PathBuf,
    pub mount_path: String,
    pub secret: ShutdownSecret,
}

/// Bind, serve and wait until the mounted path answers.
///
/// # Errors
///
/// [`ServerError::Bind`] when the port cannot be bound, [`ServerError::Startup`]
/// when the server never becomes reachable. Nothing is left running in
/// either case.
pub async fn start(options: ServerOptions) -> Result<RunningServer, ServerError> {
    let ServerOptions {
        port,
        home,
        bundle,
        mount_path,
        secret,
    } = options;

    let listener = bind_exclusive(port)
        .and_then(|socket| socket.listen(LISTEN_BACKLOG))
        .map_err(|e| ServerError::Bind {
            port,
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

    info!("Solr home: {}", home.display());
    info!(
        "Mounting {} at {mount_path} on port {port}",
        bundle.display()
    );

    let stop = Arc::new(Notify::new());
    let state = ServerState {
        secret: Arc::new(secret),
        stop: Arc::clone(&stop),
    };
    let router = build_router(&mount_path, &bundle, state);

    let stop_requested = signal::stop_requested(Arc::clone(&stop));
    let task = tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(stop_requested)
        .await
    });

    let base_url = format!("{LOOPBACK_BASE_URL}:{port}{mount_path}");
    if let Err(e) = wait_until_serving(&base_url, &task).await {
        task.abort();
        return Err(e);
    }

    Ok(RunningServer::new(port, stop, task))
}

async fn wait_until_serving(
    url: &str,
    task: &JoinHandle<std::io::Result<()>>,
) -> Result<(), ServerError> {
    let client = Client::builder()
        .no_proxy()
        .timeout(READINESS_PROBE_TIMEOUT)
        .build()
        .map_err(|e| ServerError::Startup {
            message: format!("Failed to build readiness client: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let mut backoff = ExponentialBackoff {
        max_elapsed_time: Some(READINESS_MAX_ELAPSED),
        ..Default::default()
    };

    debug!("Waiting for server at {url}");

    loop {
        if task.is_finished() {
            return Err(ServerError::Startup {
                message: format!("Server stopped before {url} became reachable"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Any HTTP answer means the listener is accepting and routing.
        match client.get(url).send().await {
            Ok(response) => {
                info!("Server is serving {url} (HTTP {})", response.status());
                return Ok(());
            }
            Err(e) => trace!("Server not ready at {url}: {e}"),
        }

        match backoff.next_backoff() {
            Some(duration) => TokioSleep(duration).await,
            None => {
                return Err(ServerError::Startup {
                    message: format!(
                        "Server at {url} did not become reachable within {READINESS_MAX_ELAPSED:?}"
                    ),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
    }
}
