use crate::helpers::occupy_port;

use launcher_core::port::{PortNegotiator, SearchRange, is_port_available};

use serial_test::serial;

/// **VALUE**: Discovery returns the lowest free port, never a later one.
///
/// **WHY THIS MATTERS**: Predictable ports make firewall rules and support easier,
/// and the scan order is part of the documented behavior.
///
/// **BUG THIS CATCHES**: Would catch randomized or descending scans, or an off-by-one
/// that skips the first candidate.
#[test]
#[serial]
fn given_busy_first_port_when_searching_then_first_free_ascending_port_is_returned() {
    // GIVEN: A range starting at an occupied port
    let (_listener, busy) = occupy_port();
    let range = SearchRange::new(busy, busy.saturating_add(20));
    let expected = range
        .ports()
        .find(|port| is_port_available(*port))
        .expect("some port in the range should be free");

    // WHEN: Searching
    let found = PortNegotiator::new(range).find_unused_port().unwrap();

    // THEN: The first free one, above the busy start
    assert_eq!(found, expected);
    assert!(found > busy);
}

#[test]
#[serial]
fn given_free_port_when_checked_then_available_and_still_free_afterwards() {
    let port = crate::helpers::free_port();

    assert!(is_port_available(port));
    assert!(is_port_available(port), "the check must not hold the port");
}
