//! # Multihash Codec
//!
//! Public keys travel as multihashes: an unsigned-varint digest function
//! code, an unsigned-varint payload length, then the payload itself.
//!
//! ```text
//! ed 01 | 20 | 7233bfc8...c0
//! code    len  32-byte Ed25519 public key
//! ```

use crate::CryptoError;
use std::fmt;
use std::str::FromStr;

/// Longest varint accepted when decoding (enough for any `u64`).
const MAX_VARINT_LEN: usize = 10;

/// Key algorithm identified by a multihash digest function code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestFunction {
    /// Ed25519 public key (code `0xed`)
    Ed25519Pub,
    /// Compressed secp256k1 public key (code `0xe7`)
    Secp256k1Pub,
    /// BLS12-381 G1 public key (code `0xea`)
    Bls12381G1Pub,
    /// BLS12-381 G2 public key (code `0xeb`)
    Bls12381G2Pub,
}

impl DigestFunction {
    /// Multicodec code of this digest function.
    pub const fn code(self) -> u64 {
        match self {
            DigestFunction::Ed25519Pub => 0xed,
            DigestFunction::Secp256k1Pub => 0xe7,
            DigestFunction::Bls12381G1Pub => 0xea,
            DigestFunction::Bls12381G2Pub => 0xeb,
        }
    }

    /// Resolve a multicodec code.
    pub fn from_code(code: u64) -> Result<Self, CryptoError> {
        match code {
            0xed => Ok(DigestFunction::Ed25519Pub),
            0xe7 => Ok(DigestFunction::Secp256k1Pub),
            0xea => Ok(DigestFunction::Bls12381G1Pub),
            0xeb => Ok(DigestFunction::Bls12381G2Pub),
            other => Err(CryptoError::UnsupportedDigest(format!("0x{other:x}"))),
        }
    }

    /// Name used in private key material (`"ed25519"`, `"secp256k1"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            DigestFunction::Ed25519Pub => "ed25519",
            DigestFunction::Secp256k1Pub => "secp256k1",
            DigestFunction::Bls12381G1Pub => "bls_normal",
            DigestFunction::Bls12381G2Pub => "bls_small",
        }
    }

    /// Expected public key length in bytes.
    pub const fn public_key_len(self) -> usize {
        match self {
            DigestFunction::Ed25519Pub => 32,
            DigestFunction::Secp256k1Pub => 33,
            DigestFunction::Bls12381G1Pub => 48,
            DigestFunction::Bls12381G2Pub => 96,
        }
    }
}

impl fmt::Display for DigestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestFunction {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ed25519" => Ok(DigestFunction::Ed25519Pub),
            "secp256k1" => Ok(DigestFunction::Secp256k1Pub),
            "bls_normal" => Ok(DigestFunction::Bls12381G1Pub),
            "bls_small" => Ok(DigestFunction::Bls12381G2Pub),
            other => Err(CryptoError::UnsupportedDigest(other.to_string())),
        }
    }
}

/// A decoded multihash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multihash {
    /// Algorithm the payload belongs to.
    pub digest_function: DigestFunction,
    /// Raw key bytes.
    pub payload: Vec<u8>,
}

impl Multihash {
    /// Create a multihash from its parts.
    pub fn new(digest_function: DigestFunction, payload: Vec<u8>) -> Self {
        Self {
            digest_function,
            payload,
        }
    }

    /// Decode multihash bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let (code, code_len) = decode_varint(bytes)?;
        let digest_function = DigestFunction::from_code(code)?;

        let rest = &bytes[code_len..];
        let (len, len_len) = decode_varint(rest)?;
        let payload = &rest[len_len..];

        if payload.len() as u64 != len {
            return Err(CryptoError::InvalidMultihash(format!(
                "declared payload length {} but {} bytes present",
                len,
                payload.len()
            )));
        }

        Ok(Self::new(digest_function, payload.to_vec()))
    }

    /// Decode a hex-encoded multihash.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Encode to multihash bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 4);
        encode_varint(self.digest_function.code(), &mut out);
        encode_varint(self.payload.len() as u64, &mut out);
        out.extend_from_slice(&self.payload);
        out
    }

    /// Encode to lower-case hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), CryptoError> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CryptoError::InvalidMultihash(
        "truncated or overlong varint".to_string(),
    ))
}
