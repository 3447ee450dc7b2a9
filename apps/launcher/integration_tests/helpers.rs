//! Helpers for driving the `solr-launcher` binary against a temp installation.

use models::ResultRecord;

use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub const BASE_DIR_ENV: &str = "SOLR_LAUNCHER_BASE_DIR";

pub fn launcher_command(base_dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_solr-launcher"));
    command
        .args(args)
        .env(BASE_DIR_ENV, base_dir)
        .env("SOLR_LAUNCHER_LOG", "debug")
        .stdin(Stdio::null());
    command
}

/// Run the launcher to completion.
pub fn run_launcher(base_dir: &Path, args: &[&str]) -> Output {
    launcher_command(base_dir, args)
        .output()
        .expect("Failed to run solr-launcher")
}

/// Start the launcher in the background.
pub fn spawn_launcher(base_dir: &Path, args: &[&str]) -> Child {
    launcher_command(base_dir, args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn solr-launcher")
}

pub fn installation_with_resources() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("solr-home")).expect("Failed to create solr home");
    std::fs::write(dir.path().join("solr.war"), "bundle").expect("Failed to write bundle");
    dir
}

pub fn read_result(base_dir: &Path) -> ResultRecord {
    std::fs::read_to_string(base_dir.join("result"))
        .expect("Result file should exist")
        .parse()
        .expect("Result file should parse")
}

/// Poll the result file until it exists or the timeout passes.
pub fn wait_for_result(base_dir: &Path, timeout: Duration) -> Option<ResultRecord> {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if let Ok(contents) = std::fs::read_to_string(base_dir.join("result"))
            && let Ok(record) = contents.parse()
        {
            return Some(record);
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    None
}

/// Wait for a child to exit, killing it if it takes too long.
pub fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<i32> {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            return status.code();
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    child.kill().ok();
    child.wait().ok();
    None
}

pub fn free_port() -> u16 {
    let listener = TcpListener::bind("0.0.0.0:0").expect("Failed to bind");
    listener.local_addr().expect("No local addr").port()
}
