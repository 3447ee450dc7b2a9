use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};

use thiserror::Error as ThisError;

/// Why the bounded start loop gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustionCause {
    /// The last discovery scan found no bindable port in the range.
    RangeExhausted { start: u16, end: u16 },
    /// A port was found but the server lost the race to bind it.
    BindFailed { port: u16, reason: String },
}

impl Display for ExhaustionCause {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            ExhaustionCause::RangeExhausted { start, end } => {
                write!(formatter, "no free port in range [{start}, {end})")
            }
            ExhaustionCause::BindFailed { port, reason } => {
                write!(formatter, "port {port} could not be bound ({reason})")
            }
        }
    }
}

#[derive(Debug, ThisError)]
pub enum PortError {
    #[error("Port Not Specified Error: no port on the command line or in config.properties {location}")]
    NotSpecified { location: ErrorLocation },

    #[error("Port Range Exhausted Error: no free port in [{start}, {end}) {location}")]
    RangeExhausted {
        start: u16,
        end: u16,
        location: ErrorLocation,
    },

    #[error("Port Attempts Exhausted Error: gave up after {attempts} attempts, {cause} {location}")]
    AttemptsExhausted {
        attempts: usize,
        cause: ExhaustionCause,
        location: ErrorLocation,
    },
}

impl PortError {
    pub fn summary(&self) -> String {
        match self {
            PortError::NotSpecified { .. } => String::from(
                "In non-dynamic port mode, a valid port must be specified on the command line or in config.properties.",
            ),
            PortError::RangeExhausted { start, end, .. } => {
                format!("Unable to find available port in range [{start}, {end}).")
            }
            PortError::AttemptsExhausted {
                attempts, cause, ..
            } => format!("Unable to find available port after {attempts} attempts: {cause}."),
        }
    }
}
