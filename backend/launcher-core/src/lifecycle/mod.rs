//! `start` and `shutdown` as seen by the command line.
//!
//! Start: config → resources → lock → port → server → persist → report.
//! Shutdown: config → remote request → report. Every outcome, good or bad,
//! ends up in the result file.

mod instance;
mod request;

pub use instance::{RunningInstance, StartOutcome};
pub use request::{DYNAMIC_PORT_MODE, StartRequest};

use crate::SOLR_MOUNT_PATH;
use crate::config::LauncherConfig;
use crate::error::CoreError;
use crate::error::config::ConfigError;
use crate::error::lock::LockError;
use crate::error::port::{ExhaustionCause, PortError};
use crate::error::server::ServerError;
use crate::installation::Installation;
use crate::lock::{InstanceLock, LockAcquisition};
use crate::port::PortNegotiator;
use crate::remote::{ShutdownClient, ShutdownOutcome};
use crate::report::ResultReporter;
use crate::server::{self, RunningServer, ServerOptions};

use common::{ErrorLocation, ShutdownSecret};

use std::panic::Location;

use log::{debug, error, info, warn};

/// Upper bound on bind attempts in dynamic mode, explicit guess included.
pub const MAX_START_ATTEMPTS: usize = 10;

pub const ALREADY_RUNNING_MESSAGE: &str = "Application is already running";
pub const ALREADY_STOPPED_MESSAGE: &str = "Server is already not running.";

#[derive(Debug, Clone)]
pub struct Launcher {
    installation: Installation,
    reporter: ResultReporter,
}

impl Launcher {
    pub fn new(installation: Installation) -> Self {
        let reporter = ResultReporter::new(installation.result_path());
        Self {
            installation,
            reporter,
        }
    }

    pub fn installation(&self) -> &Installation {
        &self.installation
    }

    /// Start a server for this installation unless one is already running.
    ///
    /// # Errors
    ///
    /// Any failure along the way. It has already been written to the result
    /// file when this returns.
    pub async fn start(&self, request: StartRequest) -> Result<StartOutcome, CoreError> {
        let mut known_port = None;

        match self.try_start(request, &mut known_port).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Start failed: {e}");
                self.write_failure(known_port, &e);
                Err(e)
            }
        }
    }

    /// Ask the server recorded in config to stop.
    ///
    /// A refused connection counts as success: the server is already down.
    pub async fn shutdown(&self) -> Result<ShutdownOutcome, CoreError> {
        let mut known_port = None;

        match self.try_shutdown(&mut known_port).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Shutdown failed: {e}");
                self.write_failure(known_port, &e);
                Err(e)
            }
        }
    }

    /// Record a failure that happened before `start` or `shutdown` could run.
    pub fn report_failure(&self, error: &CoreError) {
        error!("{} ({})", error, error.kind());
        self.write_failure(None, error);
    }

    async fn try_start(
        &self,
        request: StartRequest,
        known_port: &mut Option<u16>,
    ) -> Result<StartOutcome, CoreError> {
        let config_path = self.installation.config_path();
        let mut config = LauncherConfig::load(&config_path)?;

        self.installation.verify_resources()?;

        let lock_path = self.installation.lock_path();
        let lock = match InstanceLock::acquire(&lock_path)? {
            LockAcquisition::Acquired(lock) => lock,
            LockAcquisition::Held => {
                let Some(port) = config.port() else {
                    return Err(LockError::Inconsistent {
                        path: lock_path,
                        location: ErrorLocation::from(Location::caller()),
                    }
                    .into());
                };

                *known_port = Some(port);
                info!("Instance already running on port {port}");
                self.reporter.success(port, ALREADY_RUNNING_MESSAGE)?;
                return Ok(StartOutcome::AlreadyRunning { port });
            }
        };

        let secret = ShutdownSecret::generate();
        let server = self.negotiate_and_start(request, &config, &secret).await?;
        let port = server.port();
        *known_port = Some(port);

        config.set_port(port);
        config.set_shutdown_secret(&secret);
        if let Err(e) = config.save(&config_path) {
            abandon(server).await;
            return Err(e.into());
        }

        if let Err(e) = self
            .reporter
            .success(port, &format!("Server is started at port: {port}"))
        {
            abandon(server).await;
            return Err(e.into());
        }

        Ok(StartOutcome::Running(RunningInstance::new(server, lock)))
    }

    async fn negotiate_and_start(
        &self,
        request: StartRequest,
        config: &LauncherConfig,
        secret: &ShutdownSecret,
    ) -> Result<RunningServer, CoreError> {
        let negotiator = PortNegotiator::new(config.search_range());

        start_on_negotiated_port(&negotiator, request, config.port(), |port| {
            server::start(self.server_options(port, secret))
        })
        .await
    }

    fn server_options(&self, port: u16, secret: &ShutdownSecret) -> ServerOptions {
        ServerOptions {
            port,
            home: self.installation.solr_home(),
            bundle: self.installation.bundle_path(),
            mount_path: SOLR_MOUNT_PATH.to_string(),
            secret: secret.clone(),
        }
    }

    async fn try_shutdown(
        &self,
        known_port: &mut Option<u16>,
    ) -> Result<ShutdownOutcome, CoreError> {
        let config_path = self.installation.config_path();
        let config = LauncherConfig::load(&config_path)?;

        let Some(port) = config.port() else {
            return Err(ConfigError::MissingPort {
                location: ErrorLocation::from(Location::caller()),
                path: config_path,
            }
            .into());
        };
        *known_port = Some(port);

        let secret = config.shutdown_secret().unwrap_or_else(|| {
            warn!("No shutdown token recorded, the server will likely refuse the request");
            ShutdownSecret::new("")
        });

        let outcome = ShutdownClient::new(port)?.request_shutdown(&secret).await?;

        match outcome {
            ShutdownOutcome::Stopped { port } => {
                self.reporter
                    .success(port, &format!("Server ({port}) is shutdown"))?;
            }
            ShutdownOutcome::AlreadyStopped { port } => {
                self.reporter.success(port, ALREADY_STOPPED_MESSAGE)?;
            }
        }

        Ok(outcome)
    }

    fn write_failure(&self, port: Option<u16>, error: &CoreError) {
        if let Err(e) = self.reporter.failure(port, &error.summary()) {
            error!("Failed to write result file: {e}");
        }
    }
}

/// Run `start` on the port the negotiator picks.
///
/// Fixed mode makes exactly one attempt. Dynamic mode treats the explicit or
/// configured port as the first of [`MAX_START_ATTEMPTS`] guesses and
/// rediscovers after every lost bind race.
pub(crate) async fn start_on_negotiated_port<T, F, Fut>(
    negotiator: &PortNegotiator,
    request: StartRequest,
    configured: Option<u16>,
    mut start: F,
) -> Result<T, CoreError>
where
    F: FnMut(u16) -> Fut,
    Fut: Future<Output = Result<T, ServerError>>,
{
    if !request.dynamic {
        let port = negotiator.resolve(request.port, configured, false)?;
        return Ok(start(port).await?);
    }

    let mut explicit = request.port;
    let mut configured = configured;
    let range = negotiator.range();
    let mut cause = ExhaustionCause::RangeExhausted {
        start: range.start(),
        end: range.end(),
    };
    let mut attempts = 0;

    while attempts < MAX_START_ATTEMPTS {
        attempts += 1;

        let port = match negotiator.resolve(explicit.take(), configured.take(), true) {
            Ok(port) => port,
            Err(PortError::RangeExhausted { start, end, .. }) => {
                warn!("Attempt {attempts}/{MAX_START_ATTEMPTS}: no free port in {range}");
                cause = ExhaustionCause::RangeExhausted { start, end };
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Attempt {attempts}/{MAX_START_ATTEMPTS}: starting on port {port}");

        match start(port).await {
            Ok(started) => return Ok(started),
            Err(ServerError::Bind { port, source, .. }) => {
                warn!(
                    "Attempt {attempts}/{MAX_START_ATTEMPTS}: port {port} could not be bound: {source}"
                );
                cause = ExhaustionCause::BindFailed {
                    port,
                    reason: source.to_string(),
                };
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(PortError::AttemptsExhausted {
        attempts,
        cause,
        location: ErrorLocation::from(Location::caller()),
    }
    .into())
}

/// Stop a server whose start could not be completed.
async fn abandon(server: RunningServer) {
    server.stop();
    if let Err(e) = server.join().await {
        warn!("Server did not stop cleanly: {e}");
    }
}
