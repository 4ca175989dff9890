//! Credential error types.

use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// A password violated the configured policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Configured minimum.
        min: usize,
    },
}

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
