use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LockError {
    #[error("Lock Acquire Error: {path}: {source} {location}")]
    Acquire {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    /// Another process holds the lock but no port was ever recorded for it.
    #[error("Lock Inconsistent Error: {path} is held by another process but no port is recorded {location}")]
    Inconsistent {
        path: PathBuf,
        location: ErrorLocation,
    },
}

impl LockError {
    pub fn summary(&self) -> String {
        match self {
            LockError::Acquire { path, source, .. } => {
                format!("Failed to lock {}: {source}", path.display())
            }
            LockError::Inconsistent { path, .. } => format!(
                "Application appears to be running ({} is locked) but no port is recorded in config.properties.",
                path.display()
            ),
        }
    }
}
