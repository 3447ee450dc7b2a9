//! Client side of the shutdown protocol.

use crate::error::remote::RemoteControlError;
use crate::{LOOPBACK_BASE_URL, SHUTDOWN_ENDPOINT};

use common::{ErrorLocation, HttpStatusCode, ShutdownSecret};

use std::error::Error as StdError;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const TOKEN_PARAM: &str = "token";
const EXIT_PROCESS_PARAM: &str = "_exitJvm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The server accepted the request.
    Stopped { port: u16 },
    /// Nothing was listening on the port.
    AlreadyStopped { port: u16 },
}

impl ShutdownOutcome {
    pub fn port(&self) -> u16 {
        match self {
            ShutdownOutcome::Stopped { port } | ShutdownOutcome::AlreadyStopped { port } => *port,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownClient {
    port: u16,
    endpoint: Url,
    client: Client,
}

impl ShutdownClient {
    pub fn new(port: u16) -> Result<Self, RemoteControlError> {
        let endpoint = Url::parse(&format!("{LOOPBACK_BASE_URL}:{port}{SHUTDOWN_ENDPOINT}"))?;
        let client = Client::builder()
            .no_proxy()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()
            .map_err(|e| RemoteControlError::Client {
                message: format!("Failed to build HTTP client: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            port,
            endpoint,
            client,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Send one shutdown request. Never retried.
    pub async fn request_shutdown(
        &self,
        secret: &ShutdownSecret,
    ) -> Result<ShutdownOutcome, RemoteControlError> {
        let port = self.port;
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(TOKEN_PARAM, secret.as_str())
            .append_pair(EXIT_PROCESS_PARAM, "true");

        debug!("Sending shutdown request to port {port}");

        let response = match self.client.post(url).send().await {
            Ok(response) => response,
            Err(e) if is_connection_refused(&e) => {
                info!("Nothing is listening on port {port}");
                return Ok(ShutdownOutcome::AlreadyStopped { port });
            }
            Err(e) => {
                return Err(RemoteControlError::Transport {
                    port,
                    message: e.to_string(),
                    is_timeout: e.is_timeout(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            return Err(RemoteControlError::Rejected {
                port,
                status,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!("Server on port {port} accepted the shutdown request");
        Ok(ShutdownOutcome::Stopped { port })
    }
}

/// Refused connections surface as an `io::Error` somewhere down the source
/// chain. Other connect failures (timeouts, unreachable hosts) are not a
/// stopped server.
pub(crate) fn is_connection_refused(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = error.source();

    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<IoError>()
            && io.kind() == ErrorKind::ConnectionRefused
        {
            return true;
        }
        source = current.source();
    }

    false
}
