pub mod shutdown;
pub mod start;

use crate::cli::Command;

use launcher_core::lifecycle::Launcher;

use std::process::ExitCode;

use log::warn;

pub async fn execute(launcher: &Launcher, command: Command) -> ExitCode {
    match command {
        Command::Start { port, mode, ignored } => {
            warn_ignored(&ignored);
            start::run(launcher, port.as_deref(), mode.as_deref()).await
        }
        Command::Shutdown { ignored } => {
            warn_ignored(&ignored);
            shutdown::run(launcher).await
        }
    }
}

fn warn_ignored(ignored: &[String]) {
    if !ignored.is_empty() {
        warn!("Ignoring extra arguments: {}", ignored.join(" "));
    }
}
