//! # In-Memory Ledger
//!
//! A single-node ledger behind the `LedgerTransport` port, used by tests and
//! by the mock Torii server.
//!
//! ## Semantics
//!
//! | Stage | Check | Outcome on failure |
//! |-------|-------|--------------------|
//! | Submission | signatures verify | refused |
//! | Submission | signed by a signatory of the authority | refused |
//! | Submission | not expired | refused |
//! | Submission | hash not seen before | refused |
//! | Block | instructions apply cleanly | `Rejected { reason }` |
//!
//! Accepted transactions wait in a queue. Once `block_time` has elapsed
//! since acceptance they are committed together in the next block. Commit is
//! lazy: every call first commits whatever is due, measured with
//! `tokio::time::Instant` so a paused test clock drives it.
//!
//! A transaction applies atomically. Registering a domain that already
//! exists rejects the whole transaction with a "repetition" reason and leaves
//! the world state unchanged.

use crate::domain::clock::now_ms;
use crate::domain::errors::ClientError;
use crate::ports::outbound::LedgerTransport;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_crypto::PublicKey;
use shared_types::{
    AccountId, Domain, DomainId, HealthStatus, IdentifiableBox, Instruction, Name, NewDomain,
    QueryBox, QueryError, QueryResult, SignedQueryRequest, SignedTransaction, Status,
    TransactionHash, TransactionStatus, Value, VersionedSignedTransaction,
};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Block time of a default test node.
pub const DEFAULT_BLOCK_TIME: Duration = Duration::from_millis(100);

/// Why a transaction was refused at submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    /// The transaction could not be hashed or carries no valid signature.
    #[error("Signature verification failed: {0}")]
    Signature(String),
    /// The authority account does not exist.
    #[error("Account {0} is not registered")]
    UnknownAccount(AccountId),
    /// No signature comes from a signatory of the authority.
    #[error("Transaction is not signed by a signatory of {0}")]
    NotSignatory(AccountId),
    /// The time-to-live elapsed before submission.
    #[error("Transaction expired")]
    Expired,
    /// A transaction with the same hash was already accepted.
    #[error("Transaction {0} already submitted")]
    Duplicate(TransactionHash),
}

struct QueuedTransaction {
    hash: TransactionHash,
    tx: SignedTransaction,
    accepted_at: Instant,
}

#[derive(Default)]
struct LedgerState {
    domains: BTreeMap<Name, Domain>,
    signatories: HashMap<AccountId, Vec<PublicKey>>,
    queue: VecDeque<QueuedTransaction>,
    statuses: HashMap<TransactionHash, TransactionStatus>,
    block_height: u64,
    txs_accepted: u64,
    txs_rejected: u64,
}

/// In-process ledger node.
pub struct InMemoryLedger {
    block_time: Duration,
    started_at: Instant,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Empty ledger with the given block time.
    pub fn new(block_time: Duration) -> Self {
        Self {
            block_time,
            started_at: Instant::now(),
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Ledger whose genesis registers `account_id` (and its domain) with
    /// `public_key` as its signatory.
    pub fn with_account(block_time: Duration, account_id: AccountId, public_key: PublicKey) -> Self {
        let ledger = Self::new(block_time);
        ledger.register_account(account_id, public_key);
        ledger
    }

    /// Genesis-style registration: adds the account, creating its domain if
    /// needed. Does not go through a block.
    pub fn register_account(&self, account_id: AccountId, public_key: PublicKey) {
        let mut state = self.state.lock();
        let domain_name = account_id.domain_id.name.clone();
        let domain = state.domains.entry(domain_name).or_insert_with(|| {
            Domain::from(NewDomain::new(account_id.domain_id.clone()))
        });
        if !domain.accounts.contains(&account_id) {
            domain.accounts.push(account_id.clone());
        }
        let keys = state.signatories.entry(account_id).or_default();
        if !keys.contains(&public_key) {
            keys.push(public_key);
        }
    }

    /// Configured block time.
    pub fn block_time(&self) -> Duration {
        self.block_time
    }

    /// Current block height.
    pub fn block_height(&self) -> u64 {
        let mut state = self.state.lock();
        self.commit_due(&mut state);
        state.block_height
    }

    /// Queue a transaction.
    pub fn accept_transaction(
        &self,
        tx: VersionedSignedTransaction,
    ) -> Result<TransactionHash, SubmissionRejection> {
        let tx = tx.into_v1();
        let mut state = self.state.lock();
        self.commit_due(&mut state);

        match Self::check_submission(&state, &tx) {
            Ok(hash) => {
                debug!(tx_hash = %hash, "Transaction queued");
                state.statuses.insert(hash, TransactionStatus::Pending);
                state.queue.push_back(QueuedTransaction {
                    hash,
                    tx,
                    accepted_at: Instant::now(),
                });
                Ok(hash)
            }
            Err(rejection) => {
                warn!(reason = %rejection, "Transaction refused");
                state.txs_rejected += 1;
                Err(rejection)
            }
        }
    }

    fn check_submission(
        state: &LedgerState,
        tx: &SignedTransaction,
    ) -> Result<TransactionHash, SubmissionRejection> {
        let hash = tx
            .hash()
            .map_err(|e| SubmissionRejection::Signature(e.to_string()))?;
        tx.verify_signatures()
            .map_err(|e| SubmissionRejection::Signature(e.to_string()))?;

        let authority = &tx.payload.account_id;
        let signatories = state
            .signatories
            .get(authority)
            .ok_or_else(|| SubmissionRejection::UnknownAccount(authority.clone()))?;
        if !signatories.iter().any(|key| tx.is_signed_by(key)) {
            return Err(SubmissionRejection::NotSignatory(authority.clone()));
        }

        if tx.payload.is_expired(now_ms()) {
            return Err(SubmissionRejection::Expired);
        }
        if state.statuses.contains_key(&hash) {
            return Err(SubmissionRejection::Duplicate(hash));
        }
        Ok(hash)
    }

    /// Commit every queued transaction whose block time has elapsed.
    fn commit_due(&self, state: &mut LedgerState) {
        let now = Instant::now();
        let due = state
            .queue
            .iter()
            .take_while(|queued| queued.accepted_at + self.block_time <= now)
            .count();
        if due == 0 {
            return;
        }

        state.block_height += 1;
        let height = state.block_height;
        let batch: Vec<QueuedTransaction> = state.queue.drain(..due).collect();
        for queued in batch {
            let status = match Self::apply(&state.domains, &queued.tx) {
                Ok(new_domains) => {
                    for domain in new_domains {
                        state.domains.insert(domain.id.name.clone(), domain);
                    }
                    state.txs_accepted += 1;
                    TransactionStatus::Committed {
                        block_height: height,
                    }
                }
                Err(reason) => {
                    state.txs_rejected += 1;
                    TransactionStatus::Rejected { reason }
                }
            };
            debug!(tx_hash = %queued.hash, ?status, block_height = height, "Transaction executed");
            state.statuses.insert(queued.hash, status);
        }
        info!(block_height = height, transactions = due, "Block committed");
    }

    /// Domains a transaction would add, or the rejection reason.
    fn apply(
        domains: &BTreeMap<Name, Domain>,
        tx: &SignedTransaction,
    ) -> Result<Vec<Domain>, String> {
        let mut added: Vec<Domain> = Vec::new();
        for instruction in tx.payload.instructions.instructions() {
            let Instruction::Register(register) = instruction;
            let IdentifiableBox::NewDomain(new_domain) = &register.object else {
                return Err(format!(
                    "Cannot register a {}; only NewDomain is supported",
                    register.object.kind()
                ));
            };
            let name = &new_domain.id.name;
            if domains.contains_key(name) || added.iter().any(|d| &d.id.name == name) {
                return Err(format!("repetition: domain `{name}` is already registered"));
            }
            added.push(Domain::from(new_domain.clone()));
        }
        Ok(added)
    }

    /// Execute a signed query.
    pub fn execute_query(&self, request: &SignedQueryRequest) -> QueryResult {
        let mut state = self.state.lock();
        self.commit_due(&mut state);

        request
            .verify()
            .map_err(|e| QueryError::Signature(e.to_string()))?;

        let authority = &request.payload.account_id;
        let allowed = state
            .signatories
            .get(authority)
            .is_some_and(|keys| keys.contains(&request.signature.public_key));
        if !allowed {
            return Err(QueryError::Permission(format!(
                "{} is not a signatory of {authority}",
                request.signature.public_key
            )));
        }

        match &request.payload.query {
            QueryBox::FindAllDomains => Ok(Value::Vec(
                state
                    .domains
                    .values()
                    .cloned()
                    .map(|domain| Value::Identifiable(IdentifiableBox::Domain(domain)))
                    .collect(),
            )),
            QueryBox::FindDomainById { id } => find_domain(&state.domains, id)
                .map(|domain| Value::Identifiable(IdentifiableBox::Domain(domain))),
            QueryBox::FindTransactionByHash { hash } => state
                .statuses
                .get(hash)
                .cloned()
                .map(Value::TransactionStatus)
                .ok_or_else(|| QueryError::Find(format!("transaction {hash}"))),
        }
    }

    /// Node counters.
    pub fn node_status(&self) -> Status {
        let mut state = self.state.lock();
        self.commit_due(&mut state);
        Status {
            peers: 0,
            blocks: state.block_height,
            txs_accepted: state.txs_accepted,
            txs_rejected: state.txs_rejected,
            uptime_ms: duration_ms(self.started_at.elapsed()),
        }
    }

    /// Counters in Prometheus exposition format.
    pub fn metrics_text(&self) -> String {
        let status = self.node_status();
        let domains = self.state.lock().domains.len();
        format!(
            "# HELP block_height Current block height\n\
             # TYPE block_height counter\n\
             block_height {}\n\
             # HELP txs Transactions committed or rejected\n\
             # TYPE txs counter\n\
             txs{{type=\"accepted\"}} {}\n\
             txs{{type=\"rejected\"}} {}\n\
             # HELP domains Total number of domains\n\
             # TYPE domains gauge\n\
             domains {}\n\
             # HELP uptime_since_genesis_ms Milliseconds since the node started\n\
             # TYPE uptime_since_genesis_ms gauge\n\
             uptime_since_genesis_ms {}\n",
            status.blocks, status.txs_accepted, status.txs_rejected, domains, status.uptime_ms
        )
    }
}

fn find_domain(domains: &BTreeMap<Name, Domain>, id: &DomainId) -> Result<Domain, QueryError> {
    domains
        .get(&id.name)
        .cloned()
        .ok_or_else(|| QueryError::Find(format!("domain `{id}`")))
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_TIME)
    }
}

#[async_trait]
impl LedgerTransport for InMemoryLedger {
    async fn submit_transaction(&self, tx: VersionedSignedTransaction) -> Result<(), ClientError> {
        self.accept_transaction(tx)
            .map(|_| ())
            .map_err(|rejection| ClientError::TransactionRejected(rejection.to_string()))
    }

    async fn query(&self, request: SignedQueryRequest) -> Result<QueryResult, ClientError> {
        Ok(self.execute_query(&request))
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Ok(HealthStatus::Healthy)
    }

    async fn status(&self) -> Result<Status, ClientError> {
        Ok(self.node_status())
    }

    async fn metrics(&self) -> Result<String, ClientError> {
        Ok(self.metrics_text())
    }
}
