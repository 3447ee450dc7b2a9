use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ReportError {
    #[error("Report Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Report Record Error: {message} {location}")]
    Record {
        message: String,
        location: ErrorLocation,
    },
}

impl ReportError {
    pub fn summary(&self) -> String {
        match self {
            ReportError::Write { path, source, .. } => {
                format!("Failed to write {}: {source}", path.display())
            }
            ReportError::Record { message, .. } => message.clone(),
        }
    }
}
