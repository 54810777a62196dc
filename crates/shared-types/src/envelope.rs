//! # Signed Transaction Envelope
//!
//! The wrapper every transaction travels in on its way to Torii.
//!
//! ## Security Properties
//!
//! - **Versioning**: transactions are wrapped in `VersionedSignedTransaction`
//!   so the node can refuse unknown layouts before decoding the payload.
//! - **Signed Hash**: signatures cover the BLAKE3 hash of the canonical
//!   bincode encoding of the payload, never the JSON body.
//! - **Time-Bounded Validity**: a payload is only valid until
//!   `creation_time_ms + time_to_live_ms`.
//! - **Replay Separation**: the optional `nonce` makes otherwise identical
//!   payloads hash differently.

use crate::entities::{AccountId, Metadata};
use crate::errors::ModelError;
use crate::instructions::Executable;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::{blake3_hash, Hash, KeyPair, PublicKey, Signature};
use std::fmt;

/// Hash of a transaction payload.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(#[serde_as(as = "Hex")] pub Hash);

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({self})")
    }
}

/// A signature together with the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSignature {
    /// Signer's public key.
    pub public_key: PublicKey,
    /// Signature bytes.
    pub signature: Signature,
}

impl PayloadSignature {
    /// Sign `message` with `key_pair`.
    pub fn new(key_pair: &KeyPair, message: &[u8]) -> Self {
        Self {
            public_key: key_pair.public_key().clone(),
            signature: key_pair.sign(message),
        }
    }

    /// Verify against `message`.
    pub fn verify(&self, message: &[u8]) -> Result<(), ModelError> {
        self.public_key
            .verify(message, &self.signature)
            .map_err(ModelError::from)
    }
}

/// The signed part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Account that authored the transaction.
    pub account_id: AccountId,
    /// What the transaction executes.
    pub instructions: Executable,
    /// Unix time in milliseconds when the transaction was built.
    pub creation_time_ms: u64,
    /// How long the node may keep the transaction queued.
    pub time_to_live_ms: u64,
    /// Optional nonce to distinguish identical payloads.
    pub nonce: Option<u32>,
    /// Transaction metadata.
    pub metadata: Metadata,
}

impl TransactionPayload {
    /// Build a payload without nonce or metadata.
    pub fn new(
        account_id: AccountId,
        instructions: Executable,
        creation_time_ms: u64,
        time_to_live_ms: u64,
    ) -> Self {
        Self {
            account_id,
            instructions,
            creation_time_ms,
            time_to_live_ms,
            nonce: None,
            metadata: Metadata::new(),
        }
    }

    /// Set the nonce.
    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Canonical encoding used for hashing.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, ModelError> {
        bincode::serialize(self).map_err(|e| ModelError::Encoding(e.to_string()))
    }

    /// Hash of the canonical encoding.
    pub fn hash(&self) -> Result<TransactionHash, ModelError> {
        Ok(TransactionHash(blake3_hash(&self.canonical_bytes()?)))
    }

    /// Whether the payload's time-to-live has elapsed at `now_ms`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.creation_time_ms.saturating_add(self.time_to_live_ms)
    }
}

/// A transaction payload with its signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The signed payload.
    pub payload: TransactionPayload,
    /// Signatures over the payload hash.
    pub signatures: Vec<PayloadSignature>,
}

impl SignedTransaction {
    /// Sign `payload` with `key_pair`.
    pub fn sign(payload: TransactionPayload, key_pair: &KeyPair) -> Result<Self, ModelError> {
        let hash = payload.hash()?;
        Ok(Self {
            payload,
            signatures: vec![PayloadSignature::new(key_pair, &hash.0)],
        })
    }

    /// Hash of the payload.
    pub fn hash(&self) -> Result<TransactionHash, ModelError> {
        self.payload.hash()
    }

    /// Check that there is at least one signature and all of them verify.
    pub fn verify_signatures(&self) -> Result<(), ModelError> {
        if self.signatures.is_empty() {
            return Err(ModelError::MissingSignature);
        }
        let hash = self.hash()?;
        self.signatures
            .iter()
            .try_for_each(|signature| signature.verify(&hash.0))
    }

    /// Whether `public_key` signed this transaction.
    pub fn is_signed_by(&self, public_key: &PublicKey) -> bool {
        self.signatures
            .iter()
            .any(|signature| &signature.public_key == public_key)
    }
}

/// Version wrapper around a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", content = "content")]
pub enum VersionedSignedTransaction {
    /// Version 1 layout.
    #[serde(rename = "1")]
    V1(SignedTransaction),
}

impl VersionedSignedTransaction {
    /// Unwrap the version 1 transaction.
    pub fn into_v1(self) -> SignedTransaction {
        match self {
            VersionedSignedTransaction::V1(tx) => tx,
        }
    }
}

impl From<SignedTransaction> for VersionedSignedTransaction {
    fn from(tx: SignedTransaction) -> Self {
        VersionedSignedTransaction::V1(tx)
    }
}

/// Lifecycle of a submitted transaction as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Accepted into the queue, not yet in a block.
    Pending,
    /// Applied in the block at `block_height`.
    Committed { block_height: u64 },
    /// Included in a block but not applied.
    Rejected { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewDomain;
    use crate::instructions::{Instruction, RegisterBox};

    fn payload() -> TransactionPayload {
        TransactionPayload::new(
            "alice@wonderland".parse().unwrap(),
            Executable::single(Instruction::Register(RegisterBox::domain(NewDomain::new(
                "looking_glass".parse().unwrap(),
            )))),
            1_700_000_000_000,
            100_000,
        )
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let key_pair = KeyPair::generate();
        let tx = SignedTransaction::sign(payload(), &key_pair).unwrap();
        assert!(tx.verify_signatures().is_ok());
        assert!(tx.is_signed_by(key_pair.public_key()));
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let key_pair = KeyPair::generate();
        let mut tx = SignedTransaction::sign(payload(), &key_pair).unwrap();
        tx.payload.time_to_live_ms += 1;
        assert!(matches!(
            tx.verify_signatures(),
            Err(ModelError::Signature(_))
        ));
    }

    #[test]
    fn test_unsigned_transaction_rejected() {
        let tx = SignedTransaction {
            payload: payload(),
            signatures: Vec::new(),
        };
        assert_eq!(tx.verify_signatures(), Err(ModelError::MissingSignature));
    }

    #[test]
    fn test_nonce_changes_hash() {
        let plain = payload().hash().unwrap();
        let with_nonce = payload().with_nonce(7).hash().unwrap();
        assert_ne!(plain, with_nonce);
        assert_eq!(plain, payload().hash().unwrap());
    }

    #[test]
    fn test_expiry() {
        let payload = payload();
        assert!(!payload.is_expired(1_700_000_100_000));
        assert!(payload.is_expired(1_700_000_100_001));
    }

    #[test]
    fn test_versioned_json_round_trip() {
        let key_pair = KeyPair::generate();
        let tx: VersionedSignedTransaction =
            SignedTransaction::sign(payload(), &key_pair).unwrap().into();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["version"], "1");

        let back: VersionedSignedTransaction = serde_json::from_value(json).unwrap();
        assert!(back.into_v1().verify_signatures().is_ok());
    }

    #[test]
    fn test_hash_display_is_hex() {
        let hash = payload().hash().unwrap();
        assert_eq!(hash.to_string().len(), 64);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
    }
}
