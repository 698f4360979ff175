//! Error types for credential handling.

use thiserror::Error;

/// Failures from password hashing and verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The argon2 hashing backend failed.
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// A stored password hash could not be parsed.
    #[error("Stored password hash is malformed")]
    MalformedHash,
}
