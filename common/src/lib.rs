//! Shared primitives for the Solr launcher workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error plumbing and secret handling used by every layer
//! - **models**: pure data passed between layers
//! - **launcher-core**: lock, port negotiation, embedded server, lifecycle
//! - **solr-launcher**: the command-line shell wiring everything together

pub mod error;
pub mod http_status;
pub mod shutdown_secret;

pub use error::error_location::ErrorLocation;
pub use error::secret_error::SecretError;
pub use http_status::HttpStatusCode;
pub use shutdown_secret::ShutdownSecret;

#[cfg(test)]
mod tests;
