//! # Mock Torii
//!
//! Serves an `InMemoryLedger` over HTTP on two ephemeral ports, one for the
//! API and one for telemetry, mirroring a real peer.
//!
//! | Port | Route | Body |
//! |------|-------|------|
//! | API | `POST /transaction` | JSON `VersionedSignedTransaction`; 200 or 400 + reason |
//! | API | `POST /query` | JSON `SignedQueryRequest`; 200 + `Value` or 4xx + `QueryError` |
//! | API | `GET /health` | `Healthy` |
//! | Telemetry | `GET /status` | JSON `Status` |
//! | Telemetry | `GET /metrics` | Prometheus text |

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ledger_client::{InMemoryLedger, ToriiConfig, Url};
use shared_types::{HealthStatus, QueryError, SignedQueryRequest, VersionedSignedTransaction};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running mock peer. Servers stop when this is dropped.
pub struct MockTorii {
    ledger: Arc<InMemoryLedger>,
    api_url: Url,
    telemetry_url: Url,
    tasks: Vec<JoinHandle<()>>,
}

impl MockTorii {
    /// Bind both ports and start serving `ledger`.
    pub async fn spawn(ledger: Arc<InMemoryLedger>) -> io::Result<Self> {
        let api = TcpListener::bind("127.0.0.1:0").await?;
        let telemetry = TcpListener::bind("127.0.0.1:0").await?;
        let api_url = base_url(api.local_addr()?)?;
        let telemetry_url = base_url(telemetry.local_addr()?)?;

        let tasks = vec![
            serve(api, api_router(Arc::clone(&ledger))),
            serve(telemetry, telemetry_router(Arc::clone(&ledger))),
        ];

        Ok(Self {
            ledger,
            api_url,
            telemetry_url,
            tasks,
        })
    }

    /// The ledger behind the servers.
    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    /// Base URL of the API port.
    pub fn api_url(&self) -> Url {
        self.api_url.clone()
    }

    /// Base URL of the telemetry port.
    pub fn telemetry_url(&self) -> Url {
        self.telemetry_url.clone()
    }

    /// Both endpoints.
    pub fn torii(&self) -> ToriiConfig {
        ToriiConfig::new(self.api_url(), self.telemetry_url())
    }
}

impl Drop for MockTorii {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn base_url(addr: SocketAddr) -> io::Result<Url> {
    Url::parse(&format!("http://{addr}")).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn serve(listener: TcpListener, router: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    })
}

/// Router for the API port.
pub fn api_router(ledger: Arc<InMemoryLedger>) -> Router {
    Router::new()
        .route("/transaction", post(post_transaction))
        .route("/query", post(post_query))
        .route("/health", get(get_health))
        .with_state(ledger)
}

/// Router for the telemetry port.
pub fn telemetry_router(ledger: Arc<InMemoryLedger>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/metrics", get(get_metrics))
        .with_state(ledger)
}

async fn post_transaction(State(ledger): State<Arc<InMemoryLedger>>, body: Bytes) -> Response {
    let tx: VersionedSignedTransaction = match serde_json::from_slice(&body) {
        Ok(tx) => tx,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Failed to decode transaction: {e}"),
            )
                .into_response()
        }
    };

    match ledger.accept_transaction(tx) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(rejection) => (StatusCode::BAD_REQUEST, rejection.to_string()).into_response(),
    }
}

async fn post_query(State(ledger): State<Arc<InMemoryLedger>>, body: Bytes) -> Response {
    let request: SignedQueryRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let error = QueryError::Decode(e.to_string());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match ledger.execute_query(&request) {
        Ok(value) => Json(value).into_response(),
        Err(error) => (query_error_status(&error), Json(error)).into_response(),
    }
}

fn query_error_status(error: &QueryError) -> StatusCode {
    match error {
        QueryError::Find(_) => StatusCode::NOT_FOUND,
        QueryError::Signature(_) => StatusCode::UNAUTHORIZED,
        QueryError::Permission(_) => StatusCode::FORBIDDEN,
        QueryError::Decode(_) => StatusCode::BAD_REQUEST,
    }
}

async fn get_health() -> &'static str {
    HealthStatus::HEALTHY
}

async fn get_status(State(ledger): State<Arc<InMemoryLedger>>) -> Response {
    Json(ledger.node_status()).into_response()
}

async fn get_metrics(State(ledger): State<Arc<InMemoryLedger>>) -> String {
    ledger.metrics_text()
}
