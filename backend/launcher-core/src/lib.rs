pub mod config;
pub mod error;
pub mod installation;
pub mod lifecycle;
pub mod lock;
pub mod port;
pub mod properties;
pub mod remote;
pub mod report;
pub mod server;

#[cfg(test)]
mod tests;

pub const CONFIG_FILE_NAME: &str = "config.properties";
pub const LOCK_FILE_NAME: &str = "app.lock";
pub const RESULT_FILE_NAME: &str = "result";
pub const LOG_FILE_NAME: &str = "solr-launcher.log";
pub const SOLR_HOME_DIR_NAME: &str = "solr-home";
pub const SOLR_BUNDLE_FILE_NAME: &str = "solr.war";
pub const SOLR_MOUNT_PATH: &str = "/solr";
pub const SHUTDOWN_ENDPOINT: &str = "/shutdown";
pub const LOOPBACK_HOSTNAME: &str = "127.0.0.1";
pub const LOOPBACK_BASE_URL: &str = const_format::concatcp!("http://", LOOPBACK_HOSTNAME);
