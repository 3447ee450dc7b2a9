pub mod config;
pub mod installation;
pub mod lock;
pub mod port;
pub mod remote;
pub mod report;
pub mod server;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every way a start or shutdown attempt can fail.
///
/// `summary()` is what lands in the result file; `Display` adds the source
/// location for logs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Argument Error: {message} {location}")]
    Argument {
        message: String,
        location: ErrorLocation,
    },

    #[error("Resource Missing Error: {message} {location}")]
    ResourceMissing {
        message: String,
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Installation(#[from] installation::InstallationError),

    #[error(transparent)]
    Lock(#[from] lock::LockError),

    #[error(transparent)]
    Port(#[from] port::PortError),

    #[error(transparent)]
    Server(#[from] server::ServerError),

    #[error(transparent)]
    Remote(#[from] remote::RemoteControlError),

    #[error(transparent)]
    Report(#[from] report::ReportError),
}

impl CoreError {
    #[track_caller]
    pub fn argument(message: impl Into<String>) -> Self {
        CoreError::Argument {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn resource_missing(path: &Path, message: impl Into<String>) -> Self {
        CoreError::ResourceMissing {
            message: message.into(),
            path: path.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Taxonomy name, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Argument { .. } => "ArgumentError",
            CoreError::ResourceMissing { .. } => "ResourceMissingError",
            CoreError::Config(_) => "ConfigError",
            CoreError::Installation(_) => "InstallationError",
            CoreError::Lock(_) => "LockError",
            CoreError::Port(port::PortError::NotSpecified { .. }) => "ArgumentError",
            CoreError::Port(_) => "PortExhaustionError",
            CoreError::Server(_) => "ServerError",
            CoreError::Remote(_) => "RemoteControlError",
            CoreError::Report(_) => "ReportError",
        }
    }

    /// Human-readable message without the source location.
    pub fn summary(&self) -> String {
        match self {
            CoreError::Argument { message, .. } => message.clone(),
            CoreError::ResourceMissing { message, .. } => message.clone(),
            CoreError::Config(e) => e.summary(),
            CoreError::Installation(e) => e.summary(),
            CoreError::Lock(e) => e.summary(),
            CoreError::Port(e) => e.summary(),
            CoreError::Server(e) => e.summary(),
            CoreError::Remote(e) => e.summary(),
            CoreError::Report(e) => e.summary(),
        }
    }
}
