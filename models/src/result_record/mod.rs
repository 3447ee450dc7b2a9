//! Result record handed to whatever launched the process.
//!
//! The on-disk form is exactly three lines:
//!
//! ```text
//! Success=True
//! Port=8983
//! Message=Server is started at port: 8983
//! ```

pub mod builder;

use crate::{ErrorLocation, ModelError};

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

pub const SUCCESS_KEY: &str = "Success";
pub const PORT_KEY: &str = "Port";
pub const MESSAGE_KEY: &str = "Message";
pub const UNKNOWN_PORT: &str = "Unknown";

const TRUE_VALUE: &str = "True";
const FALSE_VALUE: &str = "False";

/// Outcome of one start or shutdown attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub success: bool,
    pub port: Option<u16>,
    pub message: String,
}

impl Display for ResultRecord {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        let success = if self.success { TRUE_VALUE } else { FALSE_VALUE };
        writeln!(formatter, "{SUCCESS_KEY}={success}")?;

        match self.port {
            Some(port) => writeln!(formatter, "{PORT_KEY}={port}")?,
            None => writeln!(formatter, "{PORT_KEY}={UNKNOWN_PORT}")?,
        }

        write!(formatter, "{MESSAGE_KEY}={}", self.message)
    }
}

impl FromStr for ResultRecord {
    type Err = ModelError;

    #[track_caller]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut success = None;
        let mut port = None;
        let mut message = None;

        for line in input.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key.trim() {
                SUCCESS_KEY => success = Some(parse_success(value.trim())?),
                PORT_KEY => port = Some(parse_port(value.trim())?),
                MESSAGE_KEY => message = Some(value.to_string()),
                _ => {}
            }
        }

        let success = success.ok_or_else(|| missing_key(SUCCESS_KEY))?;
        let port = port.ok_or_else(|| missing_key(PORT_KEY))?;
        let message = message.ok_or_else(|| missing_key(MESSAGE_KEY))?;

        Ok(ResultRecord {
            success,
            port,
            message,
        })
    }
}

#[track_caller]
fn parse_success(value: &str) -> Result<bool, ModelError> {
    if value.eq_ignore_ascii_case(TRUE_VALUE) {
        Ok(true)
    } else if value.eq_ignore_ascii_case(FALSE_VALUE) {
        Ok(false)
    } else {
        Err(ModelError::Parse {
            message: format!("Invalid {SUCCESS_KEY} value: {value}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[track_caller]
fn parse_port(value: &str) -> Result<Option<u16>, ModelError> {
    if value.eq_ignore_ascii_case(UNKNOWN_PORT) {
        return Ok(None);
    }

    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(Some(port)),
        _ => Err(ModelError::Parse {
            message: format!("Invalid {PORT_KEY} value: {value}"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[track_caller]
fn missing_key(key: &str) -> ModelError {
    ModelError::Parse {
        message: format!("Result record is missing the {key} line"),
        location: ErrorLocation::from(Location::caller()),
    }
}
