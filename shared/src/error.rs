//! Shared error types

use thiserror::Error;

/// Validation failure for user-supplied input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The human-readable failure message
    pub fn message(&self) -> &str {
        &self.0
    }
}
