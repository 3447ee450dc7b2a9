use crate::error::config::ConfigError;
use crate::port::SearchRange;
use crate::properties::Properties;

use common::{ErrorLocation, ShutdownSecret};

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};

pub const PORT_KEY: &str = "port";
pub const SEARCH_PORT_START_RANGE_KEY: &str = "searchPortStartRange";
pub const SEARCH_PORT_END_RANGE_KEY: &str = "searchPortEndRange";
pub const SHUTDOWN_TOKEN_KEY: &str = "shutdownToken";

/// Typed view over `config.properties`.
///
/// Keys this launcher does not know about are carried through load/save
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct LauncherConfig {
    properties: Properties,
}

impl LauncherConfig {
    pub fn from_properties(properties: Properties) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Load config from `path`.
    ///
    /// A missing file yields defaults. Any other read failure is returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Config file not found at {}, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    location: ErrorLocation::from(Location::caller()),
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let properties = Properties::parse(&contents);
        if properties.is_empty() {
            debug!("Config {} has no entries", path.display());
        } else {
            debug!(
                "Config loaded from {} ({} keys)",
                path.display(),
                properties.len()
            );
        }

        Ok(Self { properties })
    }

    /// Save config to `path` using temp file + rename.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let temp_path = temp_path_for(path);
        let contents = self.properties.store(SystemTime::now());

        std::fs::write(&temp_path, contents).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Last bound port, if one was recorded and is a valid port number.
    pub fn port(&self) -> Option<u16> {
        let raw = self.properties.get(PORT_KEY)?;

        match parse_port(raw) {
            Some(port) => Some(port),
            None => {
                warn!("Ignoring invalid {PORT_KEY} value in config: {raw:?}");
                None
            }
        }
    }

    pub fn set_port(&mut self, port: u16) {
        self.properties.set(PORT_KEY, port.to_string());
    }

    pub fn search_range(&self) -> SearchRange {
        let defaults = SearchRange::default();

        SearchRange::new(
            self.range_bound(SEARCH_PORT_START_RANGE_KEY, defaults.start()),
            self.range_bound(SEARCH_PORT_END_RANGE_KEY, defaults.end()),
        )
    }

    pub fn shutdown_secret(&self) -> Option<ShutdownSecret> {
        self.properties
            .get(SHUTDOWN_TOKEN_KEY)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ShutdownSecret::new)
    }

    pub fn set_shutdown_secret(&mut self, secret: &ShutdownSecret) {
        self.properties.set(SHUTDOWN_TOKEN_KEY, secret.as_str());
    }

    fn range_bound(&self, key: &str, default: u16) -> u16 {
        let Some(raw) = self.properties.get(key) else {
            return default;
        };

        parse_port(raw).unwrap_or_else(|| {
            warn!("Ignoring invalid {key} value in config: {raw:?}, using {default}");
            default
        })
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
