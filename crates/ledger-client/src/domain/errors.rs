//! # Client Errors
//!
//! Error types for client configuration, transport and ledger responses.

use shared_types::{ModelError, QueryError};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither the API nor the telemetry URL is set.
    #[error("At least one Torii endpoint (API or telemetry) must be configured")]
    NoEndpoints,

    /// A duration setting is zero.
    #[error("Invalid {field}: must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Errors returned by the client and its transports.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration.
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    /// The operation needs an endpoint that is not configured.
    #[error("Torii {0} URL is not configured")]
    MissingEndpoint(&'static str),

    /// The request could not be delivered or the response not read.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The node refused the transaction.
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// The node refused the query.
    #[error("Query rejected: {0}")]
    QueryRejected(#[from] QueryError),

    /// The node answered with something the client cannot interpret.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Building or signing a payload failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ClientError {
    /// Whether the failure happened below the ledger protocol (network, HTTP).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::UnexpectedResponse(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
