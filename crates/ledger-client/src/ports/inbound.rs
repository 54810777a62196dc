//! # Inbound Port - LedgerClientApi
//!
//! Driving port used by the orchestrator. Implementations sign on behalf of
//! the configured account; callers pass unsigned instructions and queries.
//!
//! | Method | Needs endpoint |
//! |--------|----------------|
//! | `submit` | API |
//! | `request` | API |
//! | `transaction_status` | API |
//! | `health` | API |
//! | `status` | telemetry |
//! | `metrics` | telemetry |

use crate::domain::errors::ClientError;
use async_trait::async_trait;
use shared_types::{
    Executable, HealthStatus, QueryBox, Status, TransactionHash, TransactionStatus, Value,
};

/// Primary API of the ledger client.
///
/// # Example
///
/// ```rust,ignore
/// use ledger_client::LedgerClientApi;
/// use shared_types::{Executable, Instruction, NewDomain, QueryBox, RegisterBox};
///
/// async fn example(client: &impl LedgerClientApi, domain: NewDomain) {
///     let register = Instruction::Register(RegisterBox::domain(domain));
///     let hash = client.submit(Executable::single(register)).await?;
///     let all = client.request(QueryBox::FindAllDomains).await?;
/// }
/// ```
#[async_trait]
pub trait LedgerClientApi: Send + Sync {
    /// Sign and submit `instructions`. Returns once the node acknowledges,
    /// before commitment.
    ///
    /// # Errors
    /// - `TransactionRejected`: refused at submission
    /// - `Transport`: network failure
    async fn submit(&self, instructions: Executable) -> Result<TransactionHash, ClientError>;

    /// Sign and execute `query`.
    ///
    /// # Errors
    /// - `QueryRejected`: the node answered with a `QueryError`
    async fn request(&self, query: QueryBox) -> Result<Value, ClientError>;

    /// Lifecycle status of a submitted transaction.
    async fn transaction_status(
        &self,
        hash: TransactionHash,
    ) -> Result<TransactionStatus, ClientError>;

    /// Node liveness.
    async fn health(&self) -> Result<HealthStatus, ClientError>;

    /// Node counters from the telemetry endpoint.
    async fn status(&self) -> Result<Status, ClientError>;

    /// Prometheus text from the telemetry endpoint.
    async fn metrics(&self) -> Result<String, ClientError>;
}
