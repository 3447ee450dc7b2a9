//! Port selection: fixed ports, configured ports and range discovery.

use crate::error::port::PortError;

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::io::Result as IoResult;
use std::net::{Ipv4Addr, SocketAddr};
use std::ops::Range;
use std::panic::Location;

use log::{debug, info, trace};
use tokio::net::TcpSocket;

pub const DEFAULT_SEARCH_START: u16 = 5000;
pub const DEFAULT_SEARCH_END: u16 = 50000;

/// Half-open range `[start, end)` scanned in dynamic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    start: u16,
    end: u16,
}

impl SearchRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn ports(&self) -> Range<u16> {
        self.start..self.end
    }
}

impl Default for SearchRange {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_START, DEFAULT_SEARCH_END)
    }
}

impl Display for SearchRange {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "[{}, {})", self.start, self.end)
    }
}

/// Socket bound on all interfaces with address reuse disabled.
///
/// The server listens on the returned socket; probing binds it and lets it
/// drop, so a check succeeds exactly when the server bind would.
pub(crate) fn bind_exclusive(port: u16) -> IoResult<TcpSocket> {
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(false)?;
    socket.bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))?;
    Ok(socket)
}

/// Whether `port` can be bound right now. The answer is stale as soon as it
/// is returned.
pub fn is_port_available(port: u16) -> bool {
    match bind_exclusive(port) {
        Ok(_socket) => true,
        Err(e) => {
            trace!("Port {port} unavailable: {e}");
            false
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortNegotiator {
    range: SearchRange,
}

impl PortNegotiator {
    pub fn new(range: SearchRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> SearchRange {
        self.range
    }

    /// Pick the port for this attempt.
    ///
    /// An explicit port beats the configured one. With neither, dynamic mode
    /// scans the range and fixed mode fails.
    #[track_caller]
    pub fn resolve(
        &self,
        explicit: Option<u16>,
        configured: Option<u16>,
        dynamic: bool,
    ) -> Result<u16, PortError> {
        if let Some(port) = explicit {
            debug!("Using port {port} from the command line");
            return Ok(port);
        }

        if let Some(port) = configured {
            debug!("Using port {port} from config");
            return Ok(port);
        }

        if !dynamic {
            return Err(PortError::NotSpecified {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.find_unused_port()
    }

    /// First bindable port in ascending order.
    #[track_caller]
    pub fn find_unused_port(&self) -> Result<u16, PortError> {
        debug!("Searching for a free port in {}", self.range);

        match self.range.ports().find(|port| is_port_available(*port)) {
            Some(port) => {
                info!("Found free port {port}");
                Ok(port)
            }
            None => Err(PortError::RangeExhausted {
                start: self.range.start,
                end: self.range.end,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
