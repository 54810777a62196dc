//! # Looking-Glass Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── mock_torii.rs     # axum server wrapping InMemoryLedger
//! │   └── integration/      # Registrar and client flows over real HTTP
//! │       ├── http_flows.rs
//! │       └── conflict.rs
//! └── benches/
//!     └── client_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::
//!
//! # Benchmarks
//! cargo bench -p ledger-tests
//! ```

pub mod integration;
pub mod mock_torii;

pub use mock_torii::MockTorii;
