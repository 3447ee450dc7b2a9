use crate::{ErrorLocation, ModelError, ResultRecord};

use std::panic::Location;

/// Builder for creating validated ResultRecord instances.
///
/// Line breaks in the message are flattened so the record always stays
/// three lines long.
#[derive(Debug, Default)]
pub struct ResultRecordBuilder {
    success: Option<bool>,
    port: Option<u16>,
    message: Option<String>,
}

impl ResultRecordBuilder {
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_optional_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the ResultRecord with validation.
    #[track_caller]
    pub fn build(self) -> Result<ResultRecord, ModelError> {
        let success = self.success.ok_or_else(|| ModelError::Validation {
            message: String::from("Success flag is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if self.port == Some(0) {
            return Err(ModelError::Validation {
                message: String::from("Port must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let message = self.message.ok_or_else(|| ModelError::Validation {
            message: String::from("Message is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let message = flatten_lines(&message);

        if message.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Message cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ResultRecord {
            success,
            port: self.port,
            message,
        })
    }
}

fn flatten_lines(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
