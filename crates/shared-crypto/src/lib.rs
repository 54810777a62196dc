//! # Shared Crypto - Key Material and Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `multihash` | varint multihash | Public key wire encoding |
//! | `signatures` | Ed25519 | Transaction and query signing |
//! | `key_material` | - | Key pair derivation from raw hex material |
//! | `hashing` | BLAKE3 | Payload hashing |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Secret handling**: Private key bytes live in `Zeroizing` buffers and
//!   are wiped when they go out of scope, on success and error paths alike

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod key_material;
pub mod multihash;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake3_hash, Hash};
pub use key_material::{derive_key_pair, KeyMaterial, PrivateKeyMaterial};
pub use multihash::{DigestFunction, Multihash};
pub use signatures::{KeyPair, PrivateKey, PublicKey, Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
