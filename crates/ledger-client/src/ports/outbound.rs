//! # Outbound Port - LedgerTransport
//!
//! Driven port carrying already-signed requests to a ledger node.
//!
//! | Method | Torii endpoint |
//! |--------|----------------|
//! | `submit_transaction` | `POST {api}/transaction` |
//! | `query` | `POST {api}/query` |
//! | `health` | `GET {api}/health` |
//! | `status` | `GET {telemetry}/status` |
//! | `metrics` | `GET {telemetry}/metrics` |

use crate::domain::errors::ClientError;
use async_trait::async_trait;
use shared_types::{HealthStatus, QueryResult, SignedQueryRequest, Status, VersionedSignedTransaction};
use std::sync::Arc;

/// Delivery of signed requests to a node.
///
/// `query` separates the two failure layers: `Err` means the request did not
/// complete, `Ok(Err(_))` means the node answered with a `QueryError`.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Hand a signed transaction to the node's queue.
    ///
    /// # Errors
    /// - `TransactionRejected`: the node refused it (bad signature, expired, duplicate)
    /// - `Transport`: network failure
    async fn submit_transaction(&self, tx: VersionedSignedTransaction) -> Result<(), ClientError>;

    /// Execute a signed query.
    async fn query(&self, request: SignedQueryRequest) -> Result<QueryResult, ClientError>;

    /// Node liveness.
    async fn health(&self) -> Result<HealthStatus, ClientError>;

    /// Node counters.
    async fn status(&self) -> Result<Status, ClientError>;

    /// Prometheus exposition text.
    async fn metrics(&self) -> Result<String, ClientError>;
}

#[async_trait]
impl<T: LedgerTransport + ?Sized> LedgerTransport for Arc<T> {
    async fn submit_transaction(&self, tx: VersionedSignedTransaction) -> Result<(), ClientError> {
        (**self).submit_transaction(tx).await
    }

    async fn query(&self, request: SignedQueryRequest) -> Result<QueryResult, ClientError> {
        (**self).query(request).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        (**self).health().await
    }

    async fn status(&self) -> Result<Status, ClientError> {
        (**self).status().await
    }

    async fn metrics(&self) -> Result<String, ClientError> {
        (**self).metrics().await
    }
}
