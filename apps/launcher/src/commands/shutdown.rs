use launcher_core::lifecycle::Launcher;
use launcher_core::remote::ShutdownOutcome;

use std::process::ExitCode;

use log::{debug, info};

pub async fn run(launcher: &Launcher) -> ExitCode {
    match launcher.shutdown().await {
        Ok(ShutdownOutcome::Stopped { port }) => {
            info!("Server on port {port} is stopping");
            ExitCode::SUCCESS
        }
        Ok(ShutdownOutcome::AlreadyStopped { port }) => {
            info!("Server on port {port} was not running");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("Shutdown ended with {}", e.kind());
            ExitCode::FAILURE
        }
    }
}
