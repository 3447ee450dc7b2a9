use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Misuse of a [`ShutdownSecret`](crate::ShutdownSecret).
#[derive(Debug, ThisError)]
pub enum SecretError {
    /// The token would have ended up in a serialized document.
    #[error("Secret Serialization Refused: shutdown token must be read with as_str() {location}")]
    SerializationRefused { location: ErrorLocation },
}
