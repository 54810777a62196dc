//! Ports layer for the ledger client.
//!
//! - Inbound (Driving) port: `LedgerClientApi`, what callers use
//! - Outbound (Driven) port: `LedgerTransport`, how requests reach a node

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
