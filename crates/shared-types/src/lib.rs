//! # Shared Types Crate
//!
//! Ledger data model shared by every crate that speaks to a Torii endpoint.
//!
//! ## Layout
//!
//! - `entities` - `Name`, `DomainId`, `AccountId`, `Metadata`, `Domain`
//! - `instructions` - `Instruction`, `RegisterBox`, `Executable`
//! - `envelope` - `TransactionPayload`, `SignedTransaction`, versioned wrapper
//! - `query` - `QueryBox`, `SignedQueryRequest`, `Value`, `QueryError`
//! - `status` - Torii health and telemetry status bodies
//!
//! ## Design Principles
//!
//! - **Signed Payloads**: transactions and queries carry signatures over the
//!   BLAKE3 hash of their canonical bincode encoding.
//! - **JSON on the Wire**: every type here is what travels in Torii request
//!   and response bodies.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod instructions;
pub mod query;
pub mod status;

pub use entities::*;
pub use envelope::{
    PayloadSignature, SignedTransaction, TransactionHash, TransactionPayload, TransactionStatus,
    VersionedSignedTransaction,
};
pub use errors::ModelError;
pub use instructions::*;
pub use query::*;
pub use status::*;
