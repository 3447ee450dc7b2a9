use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RemoteControlError {
    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: port {port}: {message} {location}")]
    Transport {
        port: u16,
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("Rejected Error: port {port} answered HTTP {status} {location}")]
    Rejected {
        port: u16,
        status: HttpStatusCode,
        location: ErrorLocation,
    },
}

impl RemoteControlError {
    pub fn summary(&self) -> String {
        match self {
            RemoteControlError::Client { message, .. }
            | RemoteControlError::UrlParse { message, .. } => message.clone(),
            RemoteControlError::Transport { message, .. } => message.clone(),
            RemoteControlError::Rejected { port, status, .. } if status.is_auth_failure() => {
                format!("Server ({port}) rejected the shutdown token (HTTP {status})")
            }
            RemoteControlError::Rejected { port, status, .. } => {
                format!("Server ({port}) refused the shutdown request (HTTP {status})")
            }
        }
    }
}

impl From<url::ParseError> for RemoteControlError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        RemoteControlError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
