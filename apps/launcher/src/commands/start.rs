use launcher_core::lifecycle::{Launcher, StartOutcome, StartRequest};

use std::process::ExitCode;

use log::{debug, error, info};

/// `start [port] [dynamicPort]`. Blocks for as long as the server runs.
pub async fn run(launcher: &Launcher, port: Option<&str>, mode: Option<&str>) -> ExitCode {
    let request = match StartRequest::from_args(port, mode) {
        Ok(request) => request,
        Err(e) => {
            launcher.report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    match launcher.start(request).await {
        Ok(StartOutcome::Running(instance)) => {
            info!("Serving on port {} until shutdown", instance.port());

            match instance.join().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Server stopped with an error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Ok(StartOutcome::AlreadyRunning { port }) => {
            info!("Nothing to do, already running on port {port}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("Start ended with {}", e.kind());
            ExitCode::FAILURE
        }
    }
}
