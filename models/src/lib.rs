//! Domain models for the Solr launcher.
//!
//! Pure data handed between the lifecycle controller and whoever polls its
//! outcome. No I/O lives here; `launcher-core` owns reading and writing.

pub mod error;
pub mod result_record;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use result_record::ResultRecord;
pub use result_record::builder::ResultRecordBuilder;

#[cfg(test)]
mod tests;
