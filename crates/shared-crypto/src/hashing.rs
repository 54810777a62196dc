//! # BLAKE3 Hashing
//!
//! Transaction and query payloads are hashed with BLAKE3 before signing.

/// BLAKE3 hash output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}
