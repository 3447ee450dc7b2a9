//! The installation directory and every file the launcher keeps in it.

use crate::error::CoreError;
use crate::error::installation::InstallationError;
use crate::{
    CONFIG_FILE_NAME, LOCK_FILE_NAME, LOG_FILE_NAME, RESULT_FILE_NAME, SOLR_BUNDLE_FILE_NAME,
    SOLR_HOME_DIR_NAME,
};

use common::ErrorLocation;

use std::env::current_exe;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::debug;

/// Directory containing the running executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    base_dir: PathBuf,
}

impl Installation {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the installation from the path of the running executable.
    pub fn from_current_exe() -> Result<Self, InstallationError> {
        let exe = current_exe().map_err(|e| InstallationError::ExecutablePath {
            message: format!("Failed to get current executable path: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        let dir = exe.parent().ok_or_else(|| InstallationError::NoParent {
            path: exe.clone(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Installation directory: {}", dir.display());
        Ok(Self::new(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.base_dir.join(LOCK_FILE_NAME)
    }

    pub fn result_path(&self) -> PathBuf {
        self.base_dir.join(RESULT_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(LOG_FILE_NAME)
    }

    pub fn solr_home(&self) -> PathBuf {
        self.base_dir.join(SOLR_HOME_DIR_NAME)
    }

    pub fn bundle_path(&self) -> PathBuf {
        self.base_dir.join(SOLR_BUNDLE_FILE_NAME)
    }

    /// Both the server home directory and the application bundle must exist.
    #[track_caller]
    pub fn verify_resources(&self) -> Result<(), CoreError> {
        let home = self.solr_home();
        if !home.is_dir() {
            return Err(CoreError::resource_missing(
                &home,
                format!(
                    "Solr home {} doesn't exist or is not a folder.",
                    home.display()
                ),
            ));
        }

        let bundle = self.bundle_path();
        if !bundle.exists() {
            return Err(CoreError::resource_missing(
                &bundle,
                format!("Solr war {} doesn't exist.", bundle.display()),
            ));
        }

        Ok(())
    }
}
