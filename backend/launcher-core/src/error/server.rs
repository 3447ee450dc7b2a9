use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ServerError {
    #[error("Bind Error: port {port}: {source} {location}")]
    Bind {
        port: u16,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Startup Error: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
    },

    #[error("Serve Error: {message} {location}")]
    Serve {
        message: String,
        location: ErrorLocation,
    },

    #[error("Task Error: {message} {location}")]
    Task {
        message: String,
        location: ErrorLocation,
    },
}

impl ServerError {
    pub fn summary(&self) -> String {
        match self {
            ServerError::Bind { port, source, .. } => {
                format!("Failed to bind port {port}: {source}")
            }
            ServerError::Startup { message, .. }
            | ServerError::Serve { message, .. }
            | ServerError::Task { message, .. } => message.clone(),
        }
    }
}
