//! Shared secret guarding the remote shutdown endpoint.

use crate::{ErrorLocation, SecretError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use subtle::ConstantTimeEq;
use uuid::Uuid;
use zeroize::Zeroize;

/// A shutdown token that never exposes its value in logs or debug output.
///
/// One is generated per server run and persisted next to the bound port so a
/// later `shutdown` invocation can present it.
#[derive(Clone)]
pub struct ShutdownSecret {
    inner: String,
}

impl ShutdownSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: secret.into(),
        }
    }

    /// Fresh random secret for a new server run.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }

    /// Raw value, for persisting or putting on the wire.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Constant-time comparison against a presented token.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.inner.is_empty() {
            return false;
        }

        self.inner.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for ShutdownSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShutdownSecret([REDACTED])")
    }
}

impl fmt::Display for ShutdownSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SHUTDOWN SECRET]")
    }
}

impl Drop for ShutdownSecret {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Serializing would leak the token into whatever sink receives it.
impl serde::Serialize for ShutdownSecret {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(SecretError::SerializationRefused {
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
