// Unit tests for port selection
// Tests that bind real sockets are serialized

use crate::error::port::PortError;
use crate::port::{PortNegotiator, SearchRange, bind_exclusive, is_port_available};

use std::net::TcpListener;

use serial_test::serial;

fn occupy_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[test]
fn given_default_range_then_matches_documented_bounds() {
    let range = SearchRange::default();

    assert_eq!(range.start(), 5000);
    assert_eq!(range.end(), 50000);
    assert_eq!(range.to_string(), "[5000, 50000)");
}

#[test]
fn given_inverted_range_then_it_is_empty() {
    assert!(SearchRange::new(10, 10).is_empty());
    assert!(SearchRange::new(11, 10).is_empty());
    assert!(!SearchRange::new(10, 11).is_empty());
}

/// **VALUE**: The availability check fails on a port another socket is listening on.
///
/// **BUG THIS CATCHES**: Would catch address reuse being enabled on the check socket, which
/// lets it "succeed" on ports that the real server then cannot use.
#[test]
#[serial]
fn given_listening_port_when_checked_then_unavailable() {
    // GIVEN: A port held by a listener
    let (_listener, port) = occupy_port();

    // WHEN: Probing it
    let direct = bind_exclusive(port);

    // THEN: Both the helper and the public check report it busy
    assert!(direct.is_err());
    assert!(!is_port_available(port));
}

/// **VALUE**: Precedence is explicit, then configured, then nothing.
///
/// **WHY THIS MATTERS**: `start 9000` must win over a port recorded by an earlier run,
/// otherwise users could never move the server.
#[test]
fn given_explicit_and_configured_ports_when_resolved_then_explicit_wins() {
    // GIVEN: A negotiator with the default range
    let negotiator = PortNegotiator::default();

    // WHEN/THEN: Each precedence level
    assert_eq!(negotiator.resolve(Some(9000), Some(8000), false).unwrap(), 9000);
    assert_eq!(negotiator.resolve(None, Some(8000), false).unwrap(), 8000);
    assert_eq!(negotiator.resolve(Some(9000), None, true).unwrap(), 9000);
}

/// **VALUE**: Fixed mode with no port is a configuration error, never a silent scan.
#[test]
fn given_no_port_in_fixed_mode_when_resolved_then_not_specified() {
    let negotiator = PortNegotiator::default();

    let result = negotiator.resolve(None, None, false);

    assert!(matches!(result, Err(PortError::NotSpecified { .. })));
}

/// **VALUE**: A range whose only port is busy reports exhaustion with its bounds.
#[test]
#[serial]
fn given_fully_occupied_range_when_searched_then_range_exhausted() {
    // GIVEN: A single-port range that is taken
    let (_listener, port) = occupy_port();
    let negotiator = PortNegotiator::new(SearchRange::new(port, port + 1));

    // WHEN: Searching
    let result = negotiator.find_unused_port();

    // THEN: Exhaustion names the range
    match result {
        Err(PortError::RangeExhausted { start, end, .. }) => {
            assert_eq!(start, port);
            assert_eq!(end, port + 1);
        }
        other => panic!("expected RangeExhausted, got {other:?}"),
    }
}

#[test]
fn given_empty_range_when_searched_then_range_exhausted() {
    let negotiator = PortNegotiator::new(SearchRange::new(6000, 6000));

    assert!(matches!(
        negotiator.find_unused_port(),
        Err(PortError::RangeExhausted { .. })
    ));
}
