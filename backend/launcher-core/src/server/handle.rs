//! Handle to a running embedded server.

use crate::error::server::ServerError;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;

use log::info;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// A server that has bound its port and answered a readiness probe.
///
/// Dropping the handle does not stop the server; call [`RunningServer::stop`]
/// or send the shutdown request, then [`RunningServer::join`].
#[derive(Debug)]
pub struct RunningServer {
    port: u16,
    stop: Arc<Notify>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    pub(crate) fn new(port: u16, stop: Arc<Notify>, task: JoinHandle<std::io::Result<()>>) -> Self {
        Self { port, stop, task }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Begin a graceful stop. In-flight requests are allowed to finish.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Wait until the server has stopped.
    pub async fn join(self) -> Result<(), ServerError> {
        let port = self.port;

        match self.task.await {
            Ok(Ok(())) => {
                info!("Server on port {port} stopped");
                Ok(())
            }
            Ok(Err(e)) => Err(ServerError::Serve {
                message: format!("Server on port {port} failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(ServerError::Task {
                message: format!("Server task on port {port} did not complete: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
