//! # Client Configuration
//!
//! Endpoints, identity and transaction defaults for a `Client`.

use super::errors::ConfigError;
use reqwest::Url;
use shared_crypto::KeyPair;
use shared_types::AccountId;
use std::time::Duration;

/// Default time a submitted transaction may wait in the queue.
pub const DEFAULT_TRANSACTION_TTL: Duration = Duration::from_secs(100);

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Torii endpoints. Either may be absent; operations needing a missing one
/// fail with `ClientError::MissingEndpoint`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToriiConfig {
    /// Base URL for transactions, queries and health.
    pub api_url: Option<Url>,
    /// Base URL for status and metrics.
    pub telemetry_url: Option<Url>,
}

impl ToriiConfig {
    /// Both endpoints set.
    pub fn new(api_url: Url, telemetry_url: Url) -> Self {
        Self {
            api_url: Some(api_url),
            telemetry_url: Some(telemetry_url),
        }
    }

    /// Only the API endpoint set.
    pub fn api_only(api_url: Url) -> Self {
        Self {
            api_url: Some(api_url),
            telemetry_url: None,
        }
    }
}

/// Everything a `Client` needs to sign and send requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Torii endpoints.
    pub torii: ToriiConfig,
    /// Account that signs transactions and queries.
    pub account_id: AccountId,
    /// Signing key pair of `account_id`.
    pub key_pair: KeyPair,
    /// Time-to-live stamped on every transaction.
    pub transaction_ttl: Duration,
    /// Attach a random nonce so identical payloads hash differently.
    pub add_transaction_nonce: bool,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Configuration with default TTL and timeout, no nonce.
    pub fn new(torii: ToriiConfig, account_id: AccountId, key_pair: KeyPair) -> Self {
        Self {
            torii,
            account_id,
            key_pair,
            transaction_ttl: DEFAULT_TRANSACTION_TTL,
            add_transaction_nonce: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the transaction time-to-live.
    pub fn with_transaction_ttl(mut self, ttl: Duration) -> Self {
        self.transaction_ttl = ttl;
        self
    }

    /// Attach a random nonce to each transaction.
    pub fn with_nonce(mut self, enabled: bool) -> Self {
        self.add_transaction_nonce = enabled;
        self
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.torii.api_url.is_none() && self.torii.telemetry_url.is_none() {
            return Err(ConfigError::NoEndpoints);
        }
        if self.transaction_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "transaction_ttl",
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "request_timeout",
            });
        }
        Ok(())
    }
}
