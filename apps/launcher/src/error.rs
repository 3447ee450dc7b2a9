use common::ErrorLocation;

use thiserror::Error;

/// Failures of the binary itself, before any launcher command runs.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Installation Error: {message} {location}")]
    Installation {
        message: String,
        location: ErrorLocation,
    },
}
