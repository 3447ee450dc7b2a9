// Unit tests for refused-connection detection

use crate::remote::is_connection_refused;

use std::net::TcpListener;
use std::time::Duration;

/// **VALUE**: A closed port is recognized as "nothing listening".
///
/// **WHY THIS MATTERS**: `shutdown` against a stopped server must succeed. If refusal
/// were not detected it would be reported as a transport failure.
///
/// **BUG THIS CATCHES**: Would catch the io::Error search missing the refused error
/// when reqwest wraps it in hyper errors.
#[tokio::test]
async fn given_closed_port_when_request_fails_then_detected_as_refused() {
    // GIVEN: A port that was free a moment ago
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // WHEN: Posting to it
    let error = client
        .post(format!("http://127.0.0.1:{port}/shutdown"))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .unwrap_err();

    // THEN: The error counts as refused
    assert!(is_connection_refused(&error), "unexpected error: {error}");
}

#[test]
fn given_builder_error_when_checked_then_not_refused() {
    let error = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();

    assert!(!is_connection_refused(&error));
}

/// **VALUE**: A connect failure other than a refusal is not mistaken for a stopped server.
///
/// **BUG THIS CATCHES**: Would catch every connect error being folded into
/// "already stopped", which hides unreachable or hanging hosts behind a success report.
#[tokio::test]
async fn given_unroutable_address_when_connect_fails_then_not_refused() {
    // GIVEN: A non-routable address and a short connect timeout
    let client = reqwest::Client::builder()
        .no_proxy()
        .connect_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    // WHEN: Posting to it
    let error = client
        .post("http://10.255.255.1:9/shutdown")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .unwrap_err();

    // THEN: A connect failure, but not a refusal
    assert!(error.is_connect() || error.is_timeout(), "unexpected error: {error}");
    assert!(!is_connection_refused(&error), "unexpected error: {error}");
}
