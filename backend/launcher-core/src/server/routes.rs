use crate::SHUTDOWN_ENDPOINT;

use common::ShutdownSecret;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use log::{info, warn};
use serde::Deserialize;
use tokio::sync::Notify;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) secret: Arc<ShutdownSecret>,
    pub(crate) stop: Arc<Notify>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShutdownParams {
    token: Option<String>,
    #[serde(rename = "_exitJvm")]
    exit_process: Option<String>,
}

pub(crate) fn build_router(mount_path: &str, bundle: &Path, state: ServerState) -> Router {
    let router = Router::new()
        .route(SHUTDOWN_ENDPOINT, post(shutdown))
        .with_state(state);

    let mount = mount_path.trim_end_matches('/');

    // axum refuses to nest at the root
    match (mount.is_empty(), bundle.is_dir()) {
        (false, true) => router.nest_service(mount, ServeDir::new(bundle)),
        (false, false) => router.nest_service(mount, ServeFile::new(bundle)),
        (true, true) => router.fallback_service(ServeDir::new(bundle)),
        (true, false) => router.fallback_service(ServeFile::new(bundle)),
    }
}

async fn shutdown(
    State(state): State<ServerState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(params): Query<ShutdownParams>,
) -> StatusCode {
    if !peer.ip().is_loopback() {
        warn!("Rejected shutdown request from non-local peer {peer}");
        return StatusCode::UNAUTHORIZED;
    }

    let presented = params.token.as_deref().unwrap_or_default();
    if !state.secret.matches(presented) {
        warn!("Rejected shutdown request from {peer}: invalid token");
        return StatusCode::UNAUTHORIZED;
    }

    info!(
        "Shutdown requested by {peer} (_exitJvm={})",
        params.exit_process.as_deref().unwrap_or("false")
    );
    state.stop.notify_one();

    StatusCode::OK
}
