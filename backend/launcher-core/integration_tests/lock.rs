use launcher_core::lock::{InstanceLock, LockAcquisition};

use tempfile::TempDir;

fn acquired(result: LockAcquisition) -> InstanceLock {
    match result {
        LockAcquisition::Acquired(lock) => lock,
        LockAcquisition::Held => panic!("expected the lock to be acquired"),
    }
}

/// **VALUE**: A second acquisition fails immediately while the first is held.
///
/// **WHY THIS MATTERS**: This is what keeps two servers from running against the same
/// installation. Advisory locks are per open file, so two handles in one process
/// behave like two processes.
///
/// **BUG THIS CATCHES**: Would catch a blocking lock call (the test would hang) or a
/// check based on file existence only.
#[test]
fn given_held_lock_when_acquired_again_then_reports_held() {
    // GIVEN: A lock taken once
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.lock");
    let _first = acquired(InstanceLock::acquire(&path).unwrap());

    // WHEN: Acquiring again
    let second = InstanceLock::acquire(&path).unwrap();

    // THEN: Held, not an error
    assert!(matches!(second, LockAcquisition::Held));
}

/// **VALUE**: Releasing removes the artifact and frees the lock for the next start.
#[test]
fn given_released_lock_when_acquired_again_then_succeeds() {
    // GIVEN: A lock that was taken and released
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.lock");
    let first = acquired(InstanceLock::acquire(&path).unwrap());
    assert!(path.exists());
    first.release();

    // THEN: The file is gone
    assert!(!path.exists(), "lock file must be deleted on release");

    // WHEN: Acquiring again
    let second = InstanceLock::acquire(&path).unwrap();

    // THEN: Acquired
    assert!(matches!(second, LockAcquisition::Acquired(_)));
}

/// **VALUE**: A lock file left by a crashed run does not block a new start.
///
/// **WHY THIS MATTERS**: After a power loss or `kill -9` the file stays behind. Treating
/// its mere existence as a running instance would need manual cleanup.
#[test]
fn given_stale_lock_file_when_acquired_then_reclaimed() {
    // GIVEN: A leftover file nobody holds
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.lock");
    std::fs::write(&path, "99999\n").unwrap();

    // WHEN: Acquiring
    let lock = acquired(InstanceLock::acquire(&path).unwrap());

    // THEN: The file now carries our PID
    let content = std::fs::read_to_string(lock.path()).unwrap();
    assert_eq!(content.trim(), std::process::id().to_string());
}

#[test]
fn given_missing_directory_when_acquired_then_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("app.lock");

    let result = InstanceLock::acquire(&path);

    assert!(result.is_err());
}
