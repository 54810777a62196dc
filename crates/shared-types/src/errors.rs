//! # Error Types
//!
//! Errors raised while building, encoding or interpreting data model values.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Data model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Identifier failed validation.
    #[error("Invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Account identifier is not of the form `name@domain`.
    #[error("Invalid account id `{0}`: expected `name@domain`")]
    InvalidAccountId(String),

    /// Canonical encoding failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// A signed envelope carried no signatures.
    #[error("Transaction carries no signatures")]
    MissingSignature,

    /// Signing or verification failed.
    #[error("Signature error: {0}")]
    Signature(#[from] CryptoError),

    /// A query value had an unexpected shape.
    #[error("Unexpected value: expected {expected}, got {actual}")]
    UnexpectedValue {
        expected: &'static str,
        actual: &'static str,
    },
}
