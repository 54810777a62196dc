//! # Client Service
//!
//! `Client` signs transactions and queries for the configured account and
//! hands them to a `LedgerTransport`.

use crate::adapters::http::HttpTransport;
use crate::domain::clock::now_ms;
use crate::domain::config::ClientConfig;
use crate::domain::errors::ClientError;
use crate::ports::inbound::LedgerClientApi;
use crate::ports::outbound::LedgerTransport;
use async_trait::async_trait;
use shared_crypto::{KeyPair, PublicKey};
use shared_types::{
    AccountId, Executable, HealthStatus, ModelError, QueryBox, QueryPayload, SignedQueryRequest,
    SignedTransaction, Status, TransactionHash, TransactionPayload, TransactionStatus, Value,
};
use std::time::Duration;
use tracing::debug;

/// Ledger client bound to one account and one node.
pub struct Client<T = HttpTransport> {
    account_id: AccountId,
    key_pair: KeyPair,
    transaction_ttl: Duration,
    add_transaction_nonce: bool,
    transport: T,
}

impl Client<HttpTransport> {
    /// Build a client over HTTP. Validates the configuration; performs no
    /// network I/O.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::new(config.torii.clone(), config.request_timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: LedgerTransport> Client<T> {
    /// Build a client over an arbitrary transport. Endpoint settings in
    /// `config` are ignored.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            account_id: config.account_id,
            key_pair: config.key_pair,
            transaction_ttl: config.transaction_ttl,
            add_transaction_nonce: config.add_transaction_nonce,
            transport,
        }
    }

    /// Account the client signs for.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Public key the client signs with.
    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build and sign a transaction without submitting it.
    pub fn build_transaction(
        &self,
        instructions: Executable,
    ) -> Result<SignedTransaction, ModelError> {
        let ttl_ms = u64::try_from(self.transaction_ttl.as_millis()).unwrap_or(u64::MAX);
        let mut payload =
            TransactionPayload::new(self.account_id.clone(), instructions, now_ms(), ttl_ms);
        if self.add_transaction_nonce {
            payload = payload.with_nonce(rand::random());
        }
        SignedTransaction::sign(payload, &self.key_pair)
    }

    /// Build and sign a query request.
    pub fn build_query(&self, query: QueryBox) -> Result<SignedQueryRequest, ModelError> {
        let payload = QueryPayload {
            account_id: self.account_id.clone(),
            query,
            timestamp_ms: now_ms(),
        };
        SignedQueryRequest::sign(payload, &self.key_pair)
    }
}

#[async_trait]
impl<T: LedgerTransport> LedgerClientApi for Client<T> {
    async fn submit(&self, instructions: Executable) -> Result<TransactionHash, ClientError> {
        let tx = self.build_transaction(instructions)?;
        let hash = tx.hash()?;
        debug!(tx_hash = %hash, account = %self.account_id, "Submitting transaction");
        self.transport.submit_transaction(tx.into()).await?;
        Ok(hash)
    }

    async fn request(&self, query: QueryBox) -> Result<Value, ClientError> {
        let request = self.build_query(query)?;
        debug!(query = ?request.payload.query, "Sending query");
        let value = self.transport.query(request).await??;
        Ok(value)
    }

    async fn transaction_status(
        &self,
        hash: TransactionHash,
    ) -> Result<TransactionStatus, ClientError> {
        match self.request(QueryBox::FindTransactionByHash { hash }).await? {
            Value::TransactionStatus(status) => Ok(status),
            other => Err(ModelError::UnexpectedValue {
                expected: "TransactionStatus",
                actual: other.kind(),
            }
            .into()),
        }
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.transport.health().await
    }

    async fn status(&self) -> Result<Status, ClientError> {
        self.transport.status().await
    }

    async fn metrics(&self) -> Result<String, ClientError> {
        self.transport.metrics().await
    }
}
