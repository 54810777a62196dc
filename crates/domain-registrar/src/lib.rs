//! # Domain Registrar
//!
//! Derives a key pair, registers a domain through a Torii client, waits for
//! the block to commit and confirms the domain through a query.
//!
//! ```text
//! KeyMaterial ─→ KeyPair ─→ Client ─→ Register(NewDomain) ─→ wait ─→ FindAllDomains
//! ```

pub mod app;
pub mod config;
pub mod errors;
pub mod orchestrator;

pub use app::{failure_kind, report, run, EXIT_FAILURE};
pub use config::RegistrarArgs;
pub use errors::RegistrarError;
pub use orchestrator::{await_commitment, build_client, derive_key_pair, Registrar};
