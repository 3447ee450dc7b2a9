//! Fixtures shared by the launcher-core integration tests.

use launcher_core::installation::Installation;
use models::ResultRecord;

use std::net::TcpListener;

use tempfile::TempDir;

pub const BUNDLE_CONTENT: &str = "solr bundle placeholder";

/// Installation directory with both required resources in place.
pub fn installation_with_resources() -> (TempDir, Installation) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let installation = Installation::new(dir.path());

    std::fs::create_dir(installation.solr_home()).expect("Failed to create solr home");
    std::fs::write(installation.bundle_path(), BUNDLE_CONTENT).expect("Failed to write bundle");

    (dir, installation)
}

/// Installation directory with nothing in it.
pub fn empty_installation() -> (TempDir, Installation) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let installation = Installation::new(dir.path());
    (dir, installation)
}

pub fn read_result(installation: &Installation) -> ResultRecord {
    std::fs::read_to_string(installation.result_path())
        .expect("Result file should exist")
        .parse()
        .expect("Result file should parse")
}

pub fn write_config(installation: &Installation, contents: &str) {
    std::fs::write(installation.config_path(), contents).expect("Failed to write config");
}

/// A port held by a listener until the returned value is dropped.
pub fn occupy_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("0.0.0.0:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    (listener, port)
}

/// A port that was free a moment ago.
pub fn free_port() -> u16 {
    let (_listener, port) = occupy_port();
    port
}
