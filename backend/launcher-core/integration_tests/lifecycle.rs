use crate::helpers::{
    BUNDLE_CONTENT, empty_installation, free_port, installation_with_resources, occupy_port,
    read_result, write_config,
};

use launcher_core::config::LauncherConfig;
use launcher_core::error::CoreError;
use launcher_core::error::port::{ExhaustionCause, PortError};
use launcher_core::lifecycle::{
    ALREADY_RUNNING_MESSAGE, ALREADY_STOPPED_MESSAGE, Launcher, RunningInstance, StartOutcome,
    StartRequest,
};
use launcher_core::remote::ShutdownOutcome;

use serial_test::serial;

fn running(outcome: StartOutcome) -> RunningInstance {
    match outcome {
        StartOutcome::Running(instance) => instance,
        StartOutcome::AlreadyRunning { port } => {
            panic!("expected a new server, found one already running on {port}")
        }
    }
}

// ----------------------------------------------------------------------------
// start: failures before anything is bound
// ----------------------------------------------------------------------------

/// **VALUE**: A missing solr home fails the start before the lock is created.
///
/// **WHY THIS MATTERS**: A lock file from a start that never ran would confuse the next
/// diagnosis, and the supervisor needs a clear ResourceMissingError.
#[tokio::test]
async fn given_missing_solr_home_when_started_then_resource_missing_and_no_lock() {
    // GIVEN: An empty installation
    let (_dir, installation) = empty_installation();
    let launcher = Launcher::new(installation.clone());
    let request = StartRequest::from_args(Some("8080"), None).unwrap();

    // WHEN: Starting
    let error = launcher.start(request).await.unwrap_err();

    // THEN: ResourceMissing, reported, no lock file
    assert_eq!(error.kind(), "ResourceMissingError");
    assert!(!installation.lock_path().exists());
    let record = read_result(&installation);
    assert!(!record.success);
    assert_eq!(record.port, None);
    assert!(record.message.contains("solr-home"), "{}", record.message);
}

#[tokio::test]
async fn given_missing_bundle_when_started_then_resource_missing() {
    let (_dir, installation) = empty_installation();
    std::fs::create_dir(installation.solr_home()).unwrap();
    let launcher = Launcher::new(installation.clone());

    let error = launcher
        .start(StartRequest::from_args(Some("8080"), None).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, CoreError::ResourceMissing { .. }));
    assert!(read_result(&installation).message.contains("solr.war"));
}

/// **VALUE**: A bad port argument is reported as an ArgumentError and never reaches the lock.
#[test]
fn given_invalid_port_argument_when_reported_then_argument_error_without_lock() {
    // GIVEN: A complete installation
    let (_dir, installation) = installation_with_resources();
    let launcher = Launcher::new(installation.clone());

    // WHEN: The argument is rejected and reported
    let error = StartRequest::from_args(Some("http"), None).unwrap_err();
    launcher.report_failure(&error);

    // THEN: Result file has the argument message, no lock file
    let record = read_result(&installation);
    assert!(!record.success);
    assert_eq!(record.port, None);
    assert_eq!(record.message, "Parameter port http is not a valid number.");
    assert!(!installation.lock_path().exists());
}

/// **VALUE**: Fixed mode without any port is an argument error and releases the lock.
#[tokio::test]
async fn given_no_port_anywhere_in_fixed_mode_when_started_then_argument_error() {
    let (_dir, installation) = installation_with_resources();
    let launcher = Launcher::new(installation.clone());

    let error = launcher.start(StartRequest::default()).await.unwrap_err();

    assert_eq!(error.kind(), "ArgumentError");
    assert!(!installation.lock_path().exists(), "lock must be released");
    assert!(read_result(&installation).message.contains("non-dynamic"));
}

#[tokio::test]
#[serial]
async fn given_occupied_port_in_fixed_mode_when_started_then_fails_without_retry() {
    let (_dir, installation) = installation_with_resources();
    let (_listener, busy) = occupy_port();
    let launcher = Launcher::new(installation.clone());

    let error = launcher
        .start(StartRequest::from_args(Some(&busy.to_string()), None).unwrap())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), "ServerError");
    assert!(!installation.lock_path().exists());
    assert!(!read_result(&installation).success);
}

/// **VALUE**: When every attempt finds the range full, the failure says so.
///
/// **WHY THIS MATTERS**: "range full" and "lost the bind race" need different fixes;
/// the error has to tell them apart.
#[tokio::test]
#[serial]
async fn given_full_range_in_dynamic_mode_when_started_then_attempts_exhausted_by_range() {
    // GIVEN: A one-port range that is taken
    let (_dir, installation) = installation_with_resources();
    let (_listener, busy) = occupy_port();
    write_config(
        &installation,
        &format!("searchPortStartRange={busy}\nsearchPortEndRange={}\n", busy + 1),
    );
    let launcher = Launcher::new(installation.clone());

    // WHEN: Starting in dynamic mode
    let error = launcher
        .start(StartRequest::from_args(None, Some("dynamicPort")).unwrap())
        .await
        .unwrap_err();

    // THEN: Attempts exhausted because of the range
    match &error {
        CoreError::Port(PortError::AttemptsExhausted {
            attempts, cause, ..
        }) => {
            assert_eq!(*attempts, 10);
            assert!(matches!(cause, ExhaustionCause::RangeExhausted { .. }));
        }
        other => panic!("expected AttemptsExhausted, got {other:?}"),
    }
    assert_eq!(error.kind(), "PortExhaustionError");
    assert_eq!(read_result(&installation).port, None);
}

// ----------------------------------------------------------------------------
// start/shutdown with a real server
// ----------------------------------------------------------------------------

/// **VALUE**: Full lifecycle on a fixed port: start, idempotent restart, serve, shutdown.
///
/// **WHY THIS MATTERS**: This is the path every installation takes. Each step hands data
/// to the next through files: the port and token in config, the outcome in `result`.
///
/// **BUG THIS CATCHES**: Would catch the token not being persisted (shutdown rejected),
/// the lock leaking after join, or a second start binding a second server.
#[tokio::test]
#[serial]
async fn given_free_port_when_started_and_shut_down_then_full_lifecycle_is_reported() {
    // GIVEN: A complete installation and a free port
    let (_dir, installation) = installation_with_resources();
    let launcher = Launcher::new(installation.clone());
    let port = free_port();

    // WHEN: Starting
    let instance = running(
        launcher
            .start(StartRequest::from_args(Some(&port.to_string()), None).unwrap())
            .await
            .unwrap(),
    );

    // THEN: Reported, persisted, locked
    assert_eq!(instance.port(), port);
    let record = read_result(&installation);
    assert!(record.success);
    assert_eq!(record.port, Some(port));
    assert_eq!(record.message, format!("Server is started at port: {port}"));
    let config = LauncherConfig::load(&installation.config_path()).unwrap();
    assert_eq!(config.port(), Some(port));
    assert!(config.shutdown_secret().is_some());
    assert!(installation.lock_path().exists());

    // AND: The bundle is served at /solr
    let body = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .get(format!("http://127.0.0.1:{port}/solr"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, BUNDLE_CONTENT);

    // WHEN: Starting again while running
    let again = launcher.start(StartRequest::default()).await.unwrap();

    // THEN: Already running on the same port, reported as success
    assert!(matches!(again, StartOutcome::AlreadyRunning { port: p } if p == port));
    let record = read_result(&installation);
    assert!(record.success);
    assert_eq!(record.message, ALREADY_RUNNING_MESSAGE);

    // WHEN: Shutting down
    let outcome = launcher.shutdown().await.unwrap();

    // THEN: Stopped, reported, server joins and the lock is gone
    assert_eq!(outcome, ShutdownOutcome::Stopped { port });
    assert_eq!(
        read_result(&installation).message,
        format!("Server ({port}) is shutdown")
    );
    instance.join().await.unwrap();
    assert!(!installation.lock_path().exists());
}

/// **VALUE**: In dynamic mode a busy explicit port is only a first guess.
#[tokio::test]
#[serial]
async fn given_busy_explicit_port_in_dynamic_mode_when_started_then_discovers_another() {
    // GIVEN: An occupied port passed explicitly and a range above it
    let (_dir, installation) = installation_with_resources();
    let (_listener, busy) = occupy_port();
    let end = busy.saturating_add(200);
    write_config(
        &installation,
        &format!("searchPortStartRange={busy}\nsearchPortEndRange={end}\n"),
    );
    let launcher = Launcher::new(installation.clone());

    // WHEN: Starting with the busy port in dynamic mode
    let instance = running(
        launcher
            .start(StartRequest::from_args(Some(&busy.to_string()), Some("dynamicPort")).unwrap())
            .await
            .unwrap(),
    );

    // THEN: Another port from the range was used and recorded
    let port = instance.port();
    assert_ne!(port, busy);
    assert!((busy..end).contains(&port));
    assert_eq!(read_result(&installation).port, Some(port));

    instance.stop();
    instance.join().await.unwrap();
}

/// **VALUE**: The server refuses a shutdown request with the wrong token.
#[tokio::test]
#[serial]
async fn given_running_server_when_wrong_token_posted_then_unauthorized_and_still_running() {
    // GIVEN: A running instance
    let (_dir, installation) = installation_with_resources();
    let launcher = Launcher::new(installation.clone());
    let port = free_port();
    let instance = running(
        launcher
            .start(StartRequest::from_args(Some(&port.to_string()), None).unwrap())
            .await
            .unwrap(),
    );
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // WHEN: Posting a wrong and then a missing token
    let wrong = client
        .post(format!("http://127.0.0.1:{port}/shutdown?token=nope&_exitJvm=true"))
        .send()
        .await
        .unwrap();
    let missing = client
        .post(format!("http://127.0.0.1:{port}/shutdown"))
        .send()
        .await
        .unwrap();

    // THEN: Both are 401 and the server still answers
    assert_eq!(wrong.status().as_u16(), 401);
    assert_eq!(missing.status().as_u16(), 401);
    let alive = client
        .get(format!("http://127.0.0.1:{port}/solr"))
        .send()
        .await;
    assert!(alive.is_ok());

    drop(client);
    instance.stop();
    instance.join().await.unwrap();
}

// ----------------------------------------------------------------------------
// shutdown without a server
// ----------------------------------------------------------------------------

#[tokio::test]
async fn given_no_recorded_port_when_shutdown_then_failure_is_reported() {
    let (_dir, installation) = installation_with_resources();
    let launcher = Launcher::new(installation.clone());

    let error = launcher.shutdown().await.unwrap_err();

    assert_eq!(error.kind(), "ConfigError");
    let record = read_result(&installation);
    assert!(!record.success);
    assert_eq!(record.port, None);
    assert_eq!(record.message, "Can't read port from properties file.");
}

/// **VALUE**: Shutting down a server that is not running is a success.
///
/// **WHY THIS MATTERS**: Uninstallers call `shutdown` unconditionally. Failing here
/// would abort an uninstall for no reason.
#[tokio::test]
#[serial]
async fn given_recorded_port_with_nothing_listening_when_shutdown_then_already_stopped() {
    // GIVEN: A recorded port nobody listens on
    let (_dir, installation) = installation_with_resources();
    let port = free_port();
    write_config(&installation, &format!("port={port}\nshutdownToken=abc\n"));
    let launcher = Launcher::new(installation.clone());

    // WHEN: Shutting down
    let outcome = launcher.shutdown().await.unwrap();

    // THEN: Already stopped, reported as success
    assert_eq!(outcome, ShutdownOutcome::AlreadyStopped { port });
    let record = read_result(&installation);
    assert!(record.success);
    assert_eq!(record.port, Some(port));
    assert_eq!(record.message, ALREADY_STOPPED_MESSAGE);
}
