//! Result file written at the end of every start or shutdown attempt.
//!
//! Nothing in this process reads the file back. It is the hand-off to
//! whatever launched us, which polls it instead of parsing logs.

use crate::error::report::ReportError;

use common::ErrorLocation;
use models::{ResultRecord, ResultRecordBuilder};

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{error, info};

#[derive(Debug, Clone)]
pub struct ResultReporter {
    path: PathBuf,
}

impl ResultReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    pub fn success(&self, port: u16, message: &str) -> Result<ResultRecord, ReportError> {
        let record = build_record(true, Some(port), message)?;
        self.report(&record)?;
        Ok(record)
    }

    #[track_caller]
    pub fn failure(&self, port: Option<u16>, message: &str) -> Result<ResultRecord, ReportError> {
        let record = build_record(false, port, message)?;
        self.report(&record)?;
        Ok(record)
    }

    /// Overwrite the result file. Pollers never observe a half-written record.
    pub fn report(&self, record: &ResultRecord) -> Result<(), ReportError> {
        let mut temp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        std::fs::write(&temp_path, record.to_string()).map_err(|e| ReportError::Write {
            path: temp_path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| ReportError::Write {
            path: self.path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        if record.success {
            info!("Reported success: {}", record.message);
        } else {
            error!("Reported failure: {}", record.message);
        }

        Ok(())
    }
}

#[track_caller]
fn build_record(
    success: bool,
    port: Option<u16>,
    message: &str,
) -> Result<ResultRecord, ReportError> {
    ResultRecordBuilder::default()
        .with_success(success)
        .with_optional_port(port)
        .with_message(message)
        .build()
        .map_err(|e| ReportError::Record {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
