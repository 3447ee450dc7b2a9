//! Single-instance lock for an installation directory.
//!
//! Exclusivity comes from an OS advisory lock (`flock` / `LockFileEx`) on
//! `app.lock`, never from the file merely existing. A file left behind by a
//! crashed run is unlocked and gets reclaimed by the next start.
//!
//! The lock is held for as long as the [`InstanceLock`] value lives. Dropping
//! it deletes the file and releases the lock.

use crate::error::lock::LockError;

use common::ErrorLocation;

use std::fs::{File, OpenOptions};
use std::io::{Error as IoError, ErrorKind, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info, warn};

/// Reopen budget when the lock file is swapped out between open and lock.
const MAX_REOPEN_ATTEMPTS: usize = 5;

/// Result of a non-blocking acquisition attempt.
#[derive(Debug)]
pub enum LockAcquisition {
    Acquired(InstanceLock),
    /// Another live process holds the lock.
    Held,
}

#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    file: File,
}

impl InstanceLock {
    /// Try to take the lock at `path` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Acquire`] for any I/O failure other than the lock
    /// being held elsewhere.
    pub fn acquire(path: &Path) -> Result<LockAcquisition, LockError> {
        let file = open_lock_file(path)?;
        Self::acquire_opened(path, file)
    }

    /// Lock an already opened handle on `path`.
    ///
    /// The handle may point at a file a previous holder unlinked on release.
    /// Locking that orphan proves nothing, so the path is reopened until the
    /// locked handle and the file on disk agree.
    pub(crate) fn acquire_opened(
        path: &Path,
        mut file: File,
    ) -> Result<LockAcquisition, LockError> {
        let mut attempt = 1;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {}
                Err(e) if is_contended(&e) => {
                    debug!("Lock {} is held by another process", path.display());
                    return Ok(LockAcquisition::Held);
                }
                Err(e) => return Err(acquire_error(path, e)),
            }

            let current = is_current_file(path, &file).map_err(|e| acquire_error(path, e))?;
            if current {
                break;
            }

            if attempt == MAX_REOPEN_ATTEMPTS {
                return Err(acquire_error(
                    path,
                    IoError::other(format!(
                        "lock file kept being replaced after {MAX_REOPEN_ATTEMPTS} attempts"
                    )),
                ));
            }

            debug!(
                "Locked a replaced copy of {}, reopening (attempt {attempt}/{MAX_REOPEN_ATTEMPTS})",
                path.display()
            );
            attempt += 1;
            // Closing the orphan releases its lock.
            file = open_lock_file(path)?;
        }

        if file.metadata().map(|m| m.len() > 0).unwrap_or(false) {
            info!(
                "Reclaiming stale lock file {} left by a previous run",
                path.display()
            );
        }

        // Content is diagnostic only
        if let Err(e) = write_owner_pid(&file) {
            warn!("Failed to record PID in {}: {e}", path.display());
        }

        info!("Acquired instance lock {}", path.display());

        Ok(LockAcquisition::Acquired(InstanceLock {
            path: path.to_path_buf(),
            file,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release now rather than at end of scope.
    pub fn release(self) {
        debug!("Releasing instance lock {}", self.path.display());
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        // Unlink while still locked so no other process can lock the old inode
        // after we let go of it.
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed lock file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove lock file {}: {e}", self.path.display()),
        }

        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to unlock {}: {e}", self.path.display());
        }
    }
}

#[track_caller]
fn acquire_error(path: &Path, source: IoError) -> LockError {
    LockError::Acquire {
        path: path.to_path_buf(),
        location: ErrorLocation::from(Location::caller()),
        source,
    }
}

#[track_caller]
fn open_lock_file(path: &Path) -> Result<File, LockError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| acquire_error(path, e))
}

/// Whether `file` is still the file named by `path`.
#[cfg(unix)]
fn is_current_file(path: &Path, file: &File) -> std::io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let on_disk = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let locked = file.metadata()?;

    Ok(on_disk.dev() == locked.dev() && on_disk.ino() == locked.ino())
}

/// Windows refuses to reopen a file pending deletion, so a locked handle
/// always names the live file.
#[cfg(not(unix))]
fn is_current_file(_path: &Path, _file: &File) -> std::io::Result<bool> {
    Ok(true)
}

fn is_contended(error: &IoError) -> bool {
    let contended = fs2::lock_contended_error();

    error.kind() == ErrorKind::WouldBlock
        || (error.raw_os_error().is_some() && error.raw_os_error() == contended.raw_os_error())
}

fn write_owner_pid(file: &File) -> std::io::Result<()> {
    file.set_len(0)?;
    let mut writer = file;
    writeln!(writer, "{}", std::process::id())?;
    writer.flush()
}
