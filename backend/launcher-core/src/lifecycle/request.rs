use crate::error::CoreError;

use log::warn;

/// Mode argument that turns on range discovery.
pub const DYNAMIC_PORT_MODE: &str = "dynamicPort";

/// What the caller asked `start` to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartRequest {
    /// Port from the command line. In dynamic mode only the first guess.
    pub port: Option<u16>,
    pub dynamic: bool,
}

impl StartRequest {
    /// Build a request from the raw positional arguments of `start`.
    ///
    /// # Errors
    ///
    /// [`CoreError::Argument`] when `port_arg` is not a port number in
    /// `1..=65535`.
    #[track_caller]
    pub fn from_args(port_arg: Option<&str>, mode_arg: Option<&str>) -> Result<Self, CoreError> {
        let port = match port_arg {
            Some(raw) => Some(parse_port_arg(raw)?),
            None => None,
        };

        let dynamic = match mode_arg {
            Some(mode) if mode.eq_ignore_ascii_case(DYNAMIC_PORT_MODE) => true,
            Some(mode) => {
                warn!("Ignoring unknown start mode {mode:?}");
                false
            }
            None => false,
        };

        Ok(Self { port, dynamic })
    }
}

#[track_caller]
fn parse_port_arg(raw: &str) -> Result<u16, CoreError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(CoreError::argument(format!(
            "Parameter port {raw} is not a valid number."
        ))),
    }
}
