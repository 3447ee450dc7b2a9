use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `shutdown` needs the port of the running server and none is recorded.
    #[error("Config Missing Port Error: no port recorded in {path} {location}")]
    MissingPort {
        location: ErrorLocation,
        path: PathBuf,
    },
}

impl ConfigError {
    pub fn summary(&self) -> String {
        match self {
            ConfigError::ReadError { path, source, .. } => {
                format!("Failed to read {}: {source}", path.display())
            }
            ConfigError::WriteError { path, source, .. } => {
                format!("Failed to write {}: {source}", path.display())
            }
            ConfigError::MissingPort { .. } => {
                String::from("Can't read port from properties file.")
            }
        }
    }
}
