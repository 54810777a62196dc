//! # Integration Tests
//!
//! Client and registrar against the mock Torii over HTTP, on the real clock.
//!
//! - `http_flows` - end-to-end registration, telemetry, error mapping
//! - `conflict` - repeated registrations and duplicate submissions

pub mod conflict;
pub mod http_flows;
