//! Registrar error kinds.

use ledger_client::ClientError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Failure of one step of the registration sequence.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The key material is malformed or its halves do not match.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(#[source] CryptoError),

    /// The client could not be built, the transaction could not be sent, or
    /// the node refused it.
    #[error("Domain registration failed: {0}")]
    Submission(#[source] ClientError),

    /// The existence query did not complete.
    #[error("Domain query failed: {0}")]
    Query(#[source] ClientError),

    /// The domain is absent after the wait period.
    #[error("Domain `{0}` is not registered")]
    NotFound(String),
}

impl RegistrarError {
    /// Short kind name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrarError::KeyDerivation(_) => "key_derivation",
            RegistrarError::Submission(_) => "submission",
            RegistrarError::Query(_) => "query",
            RegistrarError::NotFound(_) => "not_found",
        }
    }
}
