//! # Registration Sequence
//!
//! | Step | Operation | Error kind |
//! |------|-----------|------------|
//! | 1 | `derive_key_pair` | `KeyDerivation` |
//! | 2 | `build_client` | `Submission` |
//! | 3 | `Registrar::register_domain` | `Submission` |
//! | 4 | `await_commitment` | none |
//! | 5 | `Registrar::ensure_domain_existence` | `Query`, `NotFound` |
//!
//! `Registrar::run` performs steps 3 to 5. With `CommitWait::Poll` the last
//! two steps repeat until the domain shows up or attempts run out.

use crate::errors::RegistrarError;
use ledger_client::{Client, ClientConfig, ClientError, CommitWait, LedgerClientApi};
use shared_crypto::{KeyMaterial, KeyPair};
use shared_types::{
    DomainId, Executable, Instruction, Name, NewDomain, QueryBox, RegisterBox, TransactionHash,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Derive the signing key pair. Intermediate key bytes are wiped before this
/// returns.
pub fn derive_key_pair(material: &KeyMaterial) -> Result<KeyPair, RegistrarError> {
    shared_crypto::derive_key_pair(material).map_err(RegistrarError::KeyDerivation)
}

/// Build an HTTP client. No network I/O.
pub fn build_client(config: ClientConfig) -> Result<Client, RegistrarError> {
    Client::new(config).map_err(RegistrarError::Submission)
}

/// Sleep for `duration`.
pub async fn await_commitment(duration: Duration) {
    debug!(wait_ms = duration.as_millis() as u64, "Waiting for block commitment");
    tokio::time::sleep(duration).await;
}

/// Runs the registration steps against a ledger client.
pub struct Registrar<C> {
    client: C,
}

impl<C: LedgerClientApi> Registrar<C> {
    /// Wrap a client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit a transaction registering `name` with empty metadata and no
    /// logo. Returns once the node acknowledges it.
    pub async fn register_domain(&self, name: &str) -> Result<TransactionHash, RegistrarError> {
        let name = Name::new(name).map_err(|e| RegistrarError::Submission(ClientError::from(e)))?;
        let new_domain = NewDomain::new(DomainId::new(name));
        let register = Instruction::Register(RegisterBox::domain(new_domain));

        let hash = self
            .client
            .submit(Executable::single(register))
            .await
            .map_err(RegistrarError::Submission)?;
        debug!(tx_hash = %hash, "Registration acknowledged");
        Ok(hash)
    }

    /// Query all domains once and fail with `NotFound` if `name` is absent.
    pub async fn ensure_domain_existence(&self, name: &str) -> Result<(), RegistrarError> {
        let value = self
            .client
            .request(QueryBox::FindAllDomains)
            .await
            .map_err(RegistrarError::Query)?;

        let found = value
            .find_domain(name)
            .map_err(|e| RegistrarError::Query(ClientError::from(e)))?;
        match found {
            Some(_) => Ok(()),
            None => Err(RegistrarError::NotFound(name.to_string())),
        }
    }

    /// Wait according to `wait`, then check existence. Polling policies
    /// retry on `NotFound` until their attempts run out; other errors stop
    /// immediately.
    pub async fn ensure_domain_existence_with(
        &self,
        name: &str,
        wait: &CommitWait,
    ) -> Result<(), RegistrarError> {
        let attempts = wait.attempts();
        let mut attempt = 0;
        loop {
            await_commitment(wait.delay_for_attempt(attempt)).await;
            match self.ensure_domain_existence(name).await {
                Ok(()) => return Ok(()),
                Err(RegistrarError::NotFound(_)) if attempt + 1 < attempts => {
                    attempt += 1;
                    warn!(domain = name, attempt, attempts, "Domain not committed yet, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Register `name` and confirm it is in the world state.
    pub async fn run(
        &self,
        name: &str,
        wait: &CommitWait,
    ) -> Result<TransactionHash, RegistrarError> {
        info!(domain = name, "Registering domain");
        let hash = self.register_domain(name).await?;

        info!(domain = name, tx_hash = %hash, "Checking that domain is registered");
        self.ensure_domain_existence_with(name, wait).await?;

        info!(domain = name, "Everything is fine");
        Ok(hash)
    }
}
