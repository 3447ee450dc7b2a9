//! Process entry: arguments, environment, logging, then one command.

use crate::cli::{Invocation, parse_args};
use crate::commands::execute;
use crate::error::LauncherError;
use crate::logger::initialize as LoggerInitialize;
use crate::{BASE_DIR_ENV, ENV_FILE_NAME};

use launcher_core::installation::Installation;
use launcher_core::lifecycle::Launcher;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{debug, info, warn};

pub async fn run(args: Vec<String>) -> ExitCode {
    let invocation = parse_args(args);

    if let Invocation::Informational(message) = &invocation {
        if let Err(e) = message.print() {
            eprintln!("Failed to print usage: {e}");
        }
        return ExitCode::SUCCESS;
    }

    // Without an installation there is nowhere to put the result file.
    let installation = match resolve_installation() {
        Ok(installation) => installation,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let env_file = load_env_file(installation.base_dir());

    if let Err(e) = LoggerInitialize(&installation.log_path()) {
        eprintln!("{e}");
    }

    match env_file {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(message) => warn!("{message}"),
    }
    info!("Installation directory: {}", installation.base_dir().display());

    let launcher = Launcher::new(installation);

    match invocation {
        Invocation::Run(command) => execute(&launcher, command).await,
        Invocation::Invalid(error) => {
            launcher.report_failure(&error);
            ExitCode::FAILURE
        }
        Invocation::Informational(_) => ExitCode::SUCCESS,
    }
}

/// `SOLR_LAUNCHER_BASE_DIR` if set, else the executable's directory.
#[track_caller]
pub fn resolve_installation() -> Result<Installation, LauncherError> {
    if let Some(dir) = std::env::var_os(BASE_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(Installation::new(PathBuf::from(dir)));
    }

    Installation::from_current_exe().map_err(|e| LauncherError::Installation {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Load `.env` from the installation directory without overriding the
/// existing environment.
fn load_env_file(base_dir: &Path) -> Result<Option<PathBuf>, String> {
    let path = base_dir.join(ENV_FILE_NAME);

    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(format!("Failed to load {}: {e}", path.display())),
    }
}
