use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InstallationError {
    #[error("Executable Path Error: {message} {location}")]
    ExecutablePath {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Installation Directory Error: {path} has no parent directory {location}")]
    NoParent {
        path: PathBuf,
        location: ErrorLocation,
    },
}

impl InstallationError {
    pub fn summary(&self) -> String {
        match self {
            InstallationError::ExecutablePath { message, .. } => message.clone(),
            InstallationError::NoParent { path, .. } => {
                format!("Executable {} has no parent directory", path.display())
            }
        }
    }
}
