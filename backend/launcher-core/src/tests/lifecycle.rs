// Unit tests for start argument handling

use crate::lifecycle::StartRequest;

/// **VALUE**: Non-numeric and out-of-range ports are argument errors with the exact message.
///
/// **WHY THIS MATTERS**: Supervisors match on the message in the result file.
#[test]
fn given_invalid_port_arguments_when_parsed_then_argument_error() {
    for raw in ["abc", "0", "65536", "-80", "80.5", ""] {
        // WHEN: Parsing the argument
        let error = StartRequest::from_args(Some(raw), None).unwrap_err();

        // THEN: ArgumentError naming the bad value
        assert_eq!(error.kind(), "ArgumentError");
        assert_eq!(
            error.summary(),
            format!("Parameter port {raw} is not a valid number.")
        );
    }
}

#[test]
fn given_no_arguments_when_parsed_then_fixed_mode_without_port() {
    let request = StartRequest::from_args(None, None).unwrap();

    assert_eq!(request, StartRequest::default());
}

#[test]
fn given_port_and_dynamic_mode_when_parsed_then_both_are_set() {
    let request = StartRequest::from_args(Some("8983"), Some("dynamicPort")).unwrap();

    assert_eq!(request.port, Some(8983));
    assert!(request.dynamic);
}

#[test]
fn given_mode_in_other_case_when_parsed_then_dynamic_is_enabled() {
    let request = StartRequest::from_args(Some("8983"), Some("DYNAMICPORT")).unwrap();

    assert!(request.dynamic);
}

#[test]
fn given_unknown_mode_when_parsed_then_it_is_ignored() {
    let request = StartRequest::from_args(Some("8983"), Some("fast")).unwrap();

    assert_eq!(request.port, Some(8983));
    assert!(!request.dynamic);
}

// ----------------------------------------------------------------------------
// Bounded start loop with a scripted server start
// ----------------------------------------------------------------------------

mod start_loop {
    use crate::error::CoreError;
    use crate::error::port::{ExhaustionCause, PortError};
    use crate::error::server::ServerError;
    use crate::lifecycle::{MAX_START_ATTEMPTS, StartRequest, start_on_negotiated_port};
    use crate::port::{PortNegotiator, SearchRange};

    use common::ErrorLocation;

    use std::future::{Ready, ready};
    use std::io::{Error as IoError, ErrorKind};
    use std::net::TcpListener;
    use std::panic::Location;

    use serial_test::serial;

    fn bind_failure(port: u16) -> Ready<Result<u16, ServerError>> {
        ready(Err(ServerError::Bind {
            port,
            location: ErrorLocation::from(Location::caller()),
            source: IoError::from(ErrorKind::AddrInUse),
        }))
    }

    /// A one-port range whose port is currently free.
    fn free_single_port_range() -> (SearchRange, u16) {
        let listener = TcpListener::bind("0.0.0.0:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        (SearchRange::new(port, port + 1), port)
    }

    fn dynamic(port: Option<u16>) -> StartRequest {
        StartRequest {
            port,
            dynamic: true,
        }
    }

    /// **VALUE**: The explicit port is attempt 1 of 10, discovery fills the rest, and a
    /// run of lost bind races ends with `BindFailed`.
    ///
    /// **WHY THIS MATTERS**: Operators read the cause to decide whether to widen the
    /// range or look for a process racing the launcher for ports.
    ///
    /// **BUG THIS CATCHES**: Would catch the explicit guess being retried forever, the
    /// loop running past its bound, or the cause always reading "range exhausted".
    #[tokio::test]
    #[serial]
    async fn given_every_bind_lost_when_started_dynamically_then_bind_failed_after_ten_calls() {
        // GIVEN: A free discovered port and a start that always loses the bind
        let (range, discovered) = free_single_port_range();
        let negotiator = PortNegotiator::new(range);
        let explicit = if discovered == 6000 { 6001 } else { 6000 };
        let mut calls = Vec::new();

        // WHEN: Starting dynamically with an explicit guess
        let error = start_on_negotiated_port(&negotiator, dynamic(Some(explicit)), None, |port| {
            calls.push(port);
            bind_failure(port)
        })
        .await
        .unwrap_err();

        // THEN: Explicit first, then nine discoveries, then BindFailed on the last port
        assert_eq!(calls.len(), MAX_START_ATTEMPTS);
        assert_eq!(calls[0], explicit);
        assert!(calls[1..].iter().all(|port| *port == discovered));
        match error {
            CoreError::Port(PortError::AttemptsExhausted {
                attempts, cause, ..
            }) => {
                assert_eq!(attempts, MAX_START_ATTEMPTS);
                assert!(
                    matches!(cause, ExhaustionCause::BindFailed { port, .. } if port == discovered)
                );
            }
            other => panic!("expected AttemptsExhausted, got {other:?}"),
        }
    }

    /// **VALUE**: A configured port plays the same role as an explicit one.
    #[tokio::test]
    #[serial]
    async fn given_configured_port_when_started_dynamically_then_it_is_tried_first_and_once() {
        let (range, discovered) = free_single_port_range();
        let negotiator = PortNegotiator::new(range);
        let configured = if discovered == 7000 { 7001 } else { 7000 };
        let mut calls = Vec::new();

        let started = start_on_negotiated_port(&negotiator, dynamic(None), Some(configured), |port| {
            calls.push(port);
            if calls.len() < 3 {
                bind_failure(port)
            } else {
                ready(Ok(port))
            }
        })
        .await
        .unwrap();

        assert_eq!(started, discovered);
        assert_eq!(calls, vec![configured, discovered, discovered]);
    }

    /// **VALUE**: When discovery stops finding ports after a lost race, the cause is the
    /// range, and no start is attempted without a port.
    #[tokio::test]
    async fn given_empty_range_after_failed_guess_when_started_then_range_exhausted_after_one_call() {
        // GIVEN: No port to discover
        let negotiator = PortNegotiator::new(SearchRange::new(10, 10));
        let mut calls = 0;

        // WHEN: The explicit guess loses its bind
        let error = start_on_negotiated_port(&negotiator, dynamic(Some(8000)), None, |port| {
            calls += 1;
            bind_failure(port)
        })
        .await
        .unwrap_err();

        // THEN: One start, ten attempts, cause is the range
        assert_eq!(calls, 1);
        match error {
            CoreError::Port(PortError::AttemptsExhausted {
                attempts, cause, ..
            }) => {
                assert_eq!(attempts, MAX_START_ATTEMPTS);
                assert_eq!(cause, ExhaustionCause::RangeExhausted { start: 10, end: 10 });
            }
            other => panic!("expected AttemptsExhausted, got {other:?}"),
        }
    }

    /// **VALUE**: Fixed mode never retries a failed bind.
    #[tokio::test]
    async fn given_fixed_mode_when_bind_fails_then_single_call_and_bind_error() {
        let negotiator = PortNegotiator::new(SearchRange::new(10, 10));
        let mut calls = 0;
        let request = StartRequest {
            port: Some(8000),
            dynamic: false,
        };

        let error = start_on_negotiated_port(&negotiator, request, None, |port| {
            calls += 1;
            bind_failure(port)
        })
        .await
        .unwrap_err();

        assert_eq!(calls, 1);
        assert!(matches!(
            error,
            CoreError::Server(ServerError::Bind { port: 8000, .. })
        ));
    }
}
