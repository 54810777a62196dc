//! Adapters for the `LedgerTransport` port.
//!
//! - `http` - Torii over HTTP
//! - `memory` - in-process ledger for tests and demos

pub mod http;
pub mod memory;
