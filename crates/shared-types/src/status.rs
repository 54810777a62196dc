//! Torii health and telemetry bodies.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// The node is serving requests.
    Healthy,
}

impl HealthStatus {
    /// Plain-text form used on the wire.
    pub const HEALTHY: &'static str = "Healthy";
}

/// Body of `GET /status` on the telemetry endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Connected peers.
    pub peers: u64,
    /// Committed blocks.
    pub blocks: u64,
    /// Transactions applied.
    pub txs_accepted: u64,
    /// Transactions refused at submission or rejected in a block.
    pub txs_rejected: u64,
    /// Milliseconds since the node started.
    pub uptime_ms: u64,
}
