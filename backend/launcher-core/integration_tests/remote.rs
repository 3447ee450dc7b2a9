use crate::helpers::free_port;

use launcher_core::error::remote::RemoteControlError;
use launcher_core::remote::{ShutdownClient, ShutdownOutcome};

use common::ShutdownSecret;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: The request carries the token and the exit flag as query parameters.
///
/// **WHY THIS MATTERS**: Servers started by older launchers only understand this exact
/// wire format.
#[tokio::test]
async fn given_accepting_server_when_shutdown_requested_then_stopped() {
    // GIVEN: A server expecting the exact query
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shutdown"))
        .and(query_param("token", "abc123"))
        .and(query_param("_exitJvm", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let port = server.address().port();

    // WHEN: Requesting shutdown
    let outcome = ShutdownClient::new(port)
        .unwrap()
        .request_shutdown(&ShutdownSecret::new("abc123"))
        .await
        .unwrap();

    // THEN: Stopped on that port
    assert_eq!(outcome, ShutdownOutcome::Stopped { port });
}

/// **VALUE**: A rejected token is a failure carrying the status.
///
/// **BUG THIS CATCHES**: Would catch the response status being ignored, which would
/// report a successful shutdown while the server keeps running.
#[tokio::test]
async fn given_wrong_token_when_shutdown_requested_then_rejected_with_status() {
    // GIVEN: A server answering 401
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shutdown"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let port = server.address().port();

    // WHEN: Requesting shutdown
    let error = ShutdownClient::new(port)
        .unwrap()
        .request_shutdown(&ShutdownSecret::new("wrong"))
        .await
        .unwrap_err();

    // THEN: Rejected with 401 and an auth-specific summary
    match &error {
        RemoteControlError::Rejected { status, .. } => assert_eq!(status.0, 401),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(error.summary().contains("rejected the shutdown token"));
}

#[tokio::test]
async fn given_server_error_when_shutdown_requested_then_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = ShutdownClient::new(server.address().port())
        .unwrap()
        .request_shutdown(&ShutdownSecret::new("abc123"))
        .await;

    assert!(matches!(result, Err(RemoteControlError::Rejected { .. })));
}

/// **VALUE**: Nothing listening means the server is already stopped.
#[tokio::test]
async fn given_nothing_listening_when_shutdown_requested_then_already_stopped() {
    let port = free_port();

    let outcome = ShutdownClient::new(port)
        .unwrap()
        .request_shutdown(&ShutdownSecret::new("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome, ShutdownOutcome::AlreadyStopped { port });
}
