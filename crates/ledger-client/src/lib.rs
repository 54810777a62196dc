//! # Ledger Client
//!
//! Talks to a ledger node through its Torii API: builds and signs
//! transactions, submits them, runs signed queries, and reads the telemetry
//! endpoints.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): configuration, commit-wait policy, errors
//! - **Ports Layer** (`ports/`): `LedgerClientApi` (inbound) and
//!   `LedgerTransport` (outbound)
//! - **Adapters** (`adapters/`): `HttpTransport` over `reqwest`,
//!   `InMemoryLedger` for tests and demos
//! - **Service Layer** (`service.rs`): `Client`, wiring signing to a transport
//!
//! ```text
//! ┌──────────────┐  submit / request  ┌────────────────┐   HTTP   ┌───────────┐
//! │ Orchestrator │ ─────────────────→ │ Client<T>      │ ───────→ │ Torii     │
//! └──────────────┘                    │ (signs payload)│          └───────────┘
//!                                     └────────────────┘
//!                                            │ T = InMemoryLedger
//!                                            ↓
//!                                     ┌────────────────┐
//!                                     │ block-time     │
//!                                     │ commit queue   │
//!                                     └────────────────┘
//! ```
//!
//! ## Commitment
//!
//! `Client::submit` returns once Torii acknowledges the transaction. Commit
//! happens later, in a block. `CommitWait` describes how a caller waits for
//! it: a fixed delay sized from the block time, or bounded polling.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::http::HttpTransport;
pub use adapters::memory::InMemoryLedger;
pub use domain::commit::CommitWait;
pub use domain::config::{ClientConfig, ToriiConfig};
pub use domain::errors::{ClientError, ConfigError};
pub use ports::inbound::LedgerClientApi;
pub use ports::outbound::LedgerTransport;
pub use service::Client;

/// Re-exported so callers can build endpoint URLs without a direct `reqwest` dependency.
pub use reqwest::Url;
