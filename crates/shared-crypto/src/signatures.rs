//! # Ed25519 Signatures
//!
//! Public keys are algorithm-tagged and travel as multihash hex. Only Ed25519
//! keys can sign; other recognised algorithms decode but are refused when a
//! key pair is assembled.
//!
//! ## Security Properties
//!
//! - No RNG dependency when signing (deterministic nonce from message)
//! - Private key bytes are held in `Zeroizing` buffers
//! - `SigningKey` wipes itself on drop

use crate::multihash::{DigestFunction, Multihash};
use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

const ED25519_SEED_LEN: usize = 32;
const ED25519_KEYPAIR_LEN: usize = 64;
const SIGNATURE_LEN: usize = 64;

/// Algorithm-tagged public key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    digest_function: DigestFunction,
    payload: Vec<u8>,
}

impl PublicKey {
    /// Build a public key from a decoded multihash.
    pub fn from_multihash(multihash: &Multihash) -> Result<Self, CryptoError> {
        let expected = multihash.digest_function.public_key_len();
        if multihash.payload.len() != expected {
            return Err(CryptoError::InvalidKeyLength {
                expected,
                actual: multihash.payload.len(),
            });
        }

        if multihash.digest_function == DigestFunction::Ed25519Pub {
            // Validate it's a valid point
            ed25519_verifying_key(&multihash.payload)?;
        }

        Ok(Self {
            digest_function: multihash.digest_function,
            payload: multihash.payload.clone(),
        })
    }

    /// Encode as multihash.
    pub fn to_multihash(&self) -> Multihash {
        Multihash::new(self.digest_function, self.payload.clone())
    }

    /// Algorithm of this key.
    pub fn digest_function(&self) -> DigestFunction {
        self.digest_function
    }

    /// Raw key bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        if self.digest_function != DigestFunction::Ed25519Pub {
            return Err(CryptoError::UnsupportedAlgorithm(
                self.digest_function.name().to_string(),
            ));
        }

        let verifying_key = ed25519_verifying_key(&self.payload)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_multihash().to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_multihash(&Multihash::from_hex(s)?)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(de::Error::custom)
    }
}

/// Algorithm-tagged private key. The bytes are wiped on drop.
pub struct PrivateKey {
    digest_function: DigestFunction,
    payload: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    /// Decode a hex private key payload for the given algorithm.
    ///
    /// Ed25519 accepts either the 32-byte seed or the 64-byte
    /// `seed || public key` form.
    pub fn from_hex(digest_function: DigestFunction, payload_hex: &str) -> Result<Self, CryptoError> {
        let payload = Zeroizing::new(hex::decode(payload_hex.trim())?);

        if digest_function == DigestFunction::Ed25519Pub
            && payload.len() != ED25519_SEED_LEN
            && payload.len() != ED25519_KEYPAIR_LEN
        {
            return Err(CryptoError::InvalidKeyLength {
                expected: ED25519_KEYPAIR_LEN,
                actual: payload.len(),
            });
        }

        if payload.is_empty() {
            return Err(CryptoError::InvalidPrivateKey);
        }

        Ok(Self {
            digest_function,
            payload,
        })
    }

    /// Algorithm of this key.
    pub fn digest_function(&self) -> DigestFunction {
        self.digest_function
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, <redacted>)", self.digest_function)
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Signature::from_slice(&bytes).map_err(de::Error::custom)
    }
}

/// A signing key pair whose public half is known to match the private half.
///
/// Each copy wipes its secret on drop.
#[derive(Clone)]
pub struct KeyPair {
    public_key: PublicKey,
    signing_key: SigningKey,
}

impl KeyPair {
    /// Combine a public and a private key into a key pair.
    ///
    /// The private key is consumed; its buffer is wiped when this function
    /// returns, whether or not the keys matched.
    pub fn from_keys(public_key: PublicKey, private_key: PrivateKey) -> Result<Self, CryptoError> {
        if public_key.digest_function() != private_key.digest_function() {
            return Err(CryptoError::KeyPairMismatch(format!(
                "public key is {}, private key is {}",
                public_key.digest_function(),
                private_key.digest_function()
            )));
        }

        if private_key.digest_function() != DigestFunction::Ed25519Pub {
            return Err(CryptoError::UnsupportedAlgorithm(
                private_key.digest_function().name().to_string(),
            ));
        }

        let mut seed = Zeroizing::new([0u8; ED25519_SEED_LEN]);
        seed.copy_from_slice(&private_key.payload[..ED25519_SEED_LEN]);

        if private_key.payload.len() == ED25519_KEYPAIR_LEN
            && private_key.payload[ED25519_SEED_LEN..] != *public_key.payload()
        {
            return Err(CryptoError::KeyPairMismatch(
                "embedded public half differs from the multihash".to_string(),
            ));
        }

        let signing_key = SigningKey::from_bytes(&seed);
        if signing_key.verifying_key().as_bytes().as_slice() != public_key.payload() {
            return Err(CryptoError::KeyPairMismatch(
                "private key does not derive the given public key".to_string(),
            ));
        }

        Ok(Self {
            public_key,
            signing_key,
        })
    }

    /// Generate random Ed25519 keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let public_key = PublicKey {
            digest_function: DigestFunction::Ed25519Pub,
            payload: signing_key.verifying_key().to_bytes().to_vec(),
        };
        Self {
            public_key,
            signing_key,
        }
    }

    /// Get public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn ed25519_verifying_key(bytes: &[u8]) -> Result<VerifyingKey, CryptoError> {
    let array: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidPublicKey)?;
    VerifyingKey::from_bytes(&array).map_err(|_| CryptoError::InvalidPublicKey)
}
