//! Raw key material and key pair derivation.

use crate::multihash::{DigestFunction, Multihash};
use crate::signatures::{KeyPair, PrivateKey, PublicKey};
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded key material as it appears in node and client configs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyMaterial {
    /// Public key multihash, hex encoded.
    pub public_key_multihash: String,
    /// Private key half.
    pub private_key: PrivateKeyMaterial,
}

/// Private key as a digest function name plus hex payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct PrivateKeyMaterial {
    /// Algorithm name, e.g. `"ed25519"`.
    pub digest_function: String,
    /// Hex-encoded private key bytes.
    pub payload: String,
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("digest_function", &self.digest_function)
            .field("payload", &"<redacted>")
            .finish()
    }
}

impl KeyMaterial {
    /// Create key material from its hex parts.
    pub fn new(
        public_key_multihash: impl Into<String>,
        digest_function: impl Into<String>,
        private_payload: impl Into<String>,
    ) -> Self {
        Self {
            public_key_multihash: public_key_multihash.into(),
            private_key: PrivateKeyMaterial {
                digest_function: digest_function.into(),
                payload: private_payload.into(),
            },
        }
    }
}

/// Derive a key pair from hex key material.
///
/// The decoded multihash and private key bytes only live inside this call.
/// Every intermediate is dropped (and secret buffers zeroed) before it
/// returns, on both the success and the error path.
pub fn derive_key_pair(material: &KeyMaterial) -> Result<KeyPair, CryptoError> {
    let public_key = {
        let multihash = Multihash::from_hex(&material.public_key_multihash)?;
        PublicKey::from_multihash(&multihash)?
    };

    let digest_function: DigestFunction = material.private_key.digest_function.parse()?;
    let private_key = PrivateKey::from_hex(digest_function, &material.private_key.payload)?;

    KeyPair::from_keys(public_key, private_key)
}
