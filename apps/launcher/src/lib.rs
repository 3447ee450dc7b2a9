// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod runner;

/// Overrides the installation directory (normally the executable's directory).
pub const BASE_DIR_ENV: &str = "SOLR_LAUNCHER_BASE_DIR";

/// Log level override: `error`, `warn`, `info`, `debug`, `trace` or `off`.
pub const LOG_LEVEL_ENV: &str = "SOLR_LAUNCHER_LOG";

/// Optional environment file in the installation directory.
pub const ENV_FILE_NAME: &str = ".env";

#[cfg(test)]
mod tests;
