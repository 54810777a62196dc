//! # Queries
//!
//! Query requests, signed query envelopes and the values Torii returns.
//!
//! Query results are nested tagged unions (`Value::Vec` of
//! `Value::Identifiable(IdentifiableBox::Domain(..))`). `Value::domains` and
//! `Value::find_domain` flatten that shape for callers that only need the
//! domain records.

use crate::entities::{AccountId, Domain, DomainId, Name};
use crate::envelope::{PayloadSignature, TransactionHash, TransactionStatus};
use crate::errors::ModelError;
use crate::instructions::IdentifiableBox;
use serde::{Deserialize, Serialize};
use shared_crypto::{blake3_hash, KeyPair};
use thiserror::Error;

/// A query understood by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryBox {
    /// Every registered domain.
    FindAllDomains,
    /// One domain by id.
    FindDomainById { id: DomainId },
    /// Status of a submitted transaction.
    FindTransactionByHash { hash: TransactionHash },
}

/// The signed part of a query request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// Account issuing the query.
    pub account_id: AccountId,
    /// The query.
    pub query: QueryBox,
    /// Unix time in milliseconds when the request was built.
    pub timestamp_ms: u64,
}

impl QueryPayload {
    fn signing_hash(&self) -> Result<[u8; 32], ModelError> {
        let bytes = bincode::serialize(self).map_err(|e| ModelError::Encoding(e.to_string()))?;
        Ok(blake3_hash(&bytes))
    }
}

/// A query with the issuer's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedQueryRequest {
    /// The signed payload.
    pub payload: QueryPayload,
    /// Signature over the payload hash.
    pub signature: PayloadSignature,
}

impl SignedQueryRequest {
    /// Sign `payload` with `key_pair`.
    pub fn sign(payload: QueryPayload, key_pair: &KeyPair) -> Result<Self, ModelError> {
        let hash = payload.signing_hash()?;
        Ok(Self {
            payload,
            signature: PayloadSignature::new(key_pair, &hash),
        })
    }

    /// Verify the signature against the payload.
    pub fn verify(&self) -> Result<(), ModelError> {
        self.signature.verify(&self.payload.signing_hash()?)
    }
}

/// A value returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Free-form string.
    String(String),
    /// Identifier.
    Name(Name),
    /// Sequence of values.
    Vec(Vec<Value>),
    /// A ledger object.
    Identifiable(IdentifiableBox),
    /// Transaction lifecycle status.
    TransactionStatus(TransactionStatus),
}

impl Value {
    /// Short variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::String(_) => "String",
            Value::Name(_) => "Name",
            Value::Vec(_) => "Vec",
            Value::Identifiable(boxed) => boxed.kind(),
            Value::TransactionStatus(_) => "TransactionStatus",
        }
    }

    /// View a `Vec` of domain records as domains.
    pub fn domains(&self) -> Result<Vec<&Domain>, ModelError> {
        let Value::Vec(values) = self else {
            return Err(ModelError::UnexpectedValue {
                expected: "Vec",
                actual: self.kind(),
            });
        };

        values
            .iter()
            .map(|value| match value {
                Value::Identifiable(IdentifiableBox::Domain(domain)) => Ok(domain),
                other => Err(ModelError::UnexpectedValue {
                    expected: "Domain",
                    actual: other.kind(),
                }),
            })
            .collect()
    }

    /// Find a domain by name in a `Vec` of domain records.
    pub fn find_domain(&self, name: &str) -> Result<Option<&Domain>, ModelError> {
        Ok(self
            .domains()?
            .into_iter()
            .find(|domain| domain.id.name.as_str() == name))
    }
}

/// Reasons the ledger refuses to answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum QueryError {
    /// The requested entity does not exist.
    #[error("Entity not found: {0}")]
    Find(String),
    /// The query signature did not verify.
    #[error("Signature verification failed: {0}")]
    Signature(String),
    /// The issuer may not run this query.
    #[error("Permission denied: {0}")]
    Permission(String),
    /// The request body could not be decoded.
    #[error("Failed to decode query: {0}")]
    Decode(String),
}

/// Outcome of executing a query.
pub type QueryResult = Result<Value, QueryError>;
