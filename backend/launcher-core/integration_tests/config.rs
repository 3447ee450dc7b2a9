use launcher_core::config::LauncherConfig;

use tempfile::TempDir;

/// **VALUE**: A port written to config reads back unchanged.
///
/// **WHY THIS MATTERS**: `shutdown` finds the server only through this value. Any
/// formatting drift between save and load would orphan the running server.
#[test]
fn given_port_12345_when_saved_and_loaded_then_reads_back_exactly() {
    // GIVEN: A config with port 12345
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.properties");
    let mut config = LauncherConfig::default();
    config.set_port(12345);

    // WHEN: Saving and loading
    config.save(&path).unwrap();
    let loaded = LauncherConfig::load(&path).unwrap();

    // THEN: Same port, stored as plain text
    assert_eq!(loaded.port(), Some(12345));
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.lines().any(|line| line == "port=12345"), "raw file: {raw}");
}

#[test]
fn given_file_written_by_hand_when_loaded_then_port_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.properties");
    std::fs::write(&path, "#Tue Mar 05 10:00:00 CET 2024\nport = 8983\n").unwrap();

    let loaded = LauncherConfig::load(&path).unwrap();

    assert_eq!(loaded.port(), Some(8983));
}
