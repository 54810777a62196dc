//! # Torii HTTP Transport
//!
//! `LedgerTransport` over `reqwest`. Bodies are JSON except `/health`
//! (plain text) and `/metrics` (Prometheus text).

use crate::domain::config::ToriiConfig;
use crate::domain::errors::ClientError;
use crate::ports::outbound::LedgerTransport;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use shared_types::{
    HealthStatus, QueryError, QueryResult, SignedQueryRequest, Status, Value,
    VersionedSignedTransaction,
};
use std::time::Duration;
use tracing::debug;

/// Connect timeout, independent of the per-request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for one Torii node.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    torii: ToriiConfig,
}

impl HttpTransport {
    /// Build the underlying HTTP client. Performs no network I/O.
    pub fn new(torii: ToriiConfig, request_timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
            .build()?;
        Ok(Self { client, torii })
    }

    /// Configured endpoints.
    pub fn torii(&self) -> &ToriiConfig {
        &self.torii
    }

    fn api_endpoint(&self, path: &str) -> Result<String, ClientError> {
        let base = self
            .torii
            .api_url
            .as_ref()
            .ok_or(ClientError::MissingEndpoint("API"))?;
        Ok(join(base, path))
    }

    fn telemetry_endpoint(&self, path: &str) -> Result<String, ClientError> {
        let base = self
            .torii
            .telemetry_url
            .as_ref()
            .ok_or(ClientError::MissingEndpoint("telemetry"))?;
        Ok(join(base, path))
    }

    async fn get(&self, endpoint: &str) -> Result<Response, ClientError> {
        debug!(endpoint, "GET");
        self.client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))
    }
}

fn join(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> ClientError {
    if err.is_connect() {
        ClientError::Transport(format!("Cannot connect to {endpoint}"))
    } else if err.is_timeout() {
        ClientError::Transport(format!("Request to {endpoint} timed out"))
    } else {
        ClientError::Transport(err.to_string())
    }
}

async fn expect_success(endpoint: &str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::UnexpectedResponse(format!(
        "{endpoint} returned {status}: {body}"
    )))
}

#[async_trait]
impl LedgerTransport for HttpTransport {
    async fn submit_transaction(&self, tx: VersionedSignedTransaction) -> Result<(), ClientError> {
        let endpoint = self.api_endpoint("transaction")?;
        debug!(endpoint = %endpoint, "POST transaction");

        let response = self
            .client
            .post(&endpoint)
            .json(&tx)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let reason = response
            .text()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;
        Err(ClientError::TransactionRejected(format!("{status}: {reason}")))
    }

    async fn query(&self, request: SignedQueryRequest) -> Result<QueryResult, ClientError> {
        let endpoint = self.api_endpoint("query")?;
        debug!(endpoint = %endpoint, query = ?request.payload.query, "POST query");

        let response = self
            .client
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        if status == StatusCode::OK {
            let value: Value = serde_json::from_slice(&body)
                .map_err(|e| ClientError::UnexpectedResponse(format!("query value: {e}")))?;
            return Ok(Ok(value));
        }
        if status.is_client_error() {
            if let Ok(error) = serde_json::from_slice::<QueryError>(&body) {
                return Ok(Err(error));
            }
        }
        Err(ClientError::UnexpectedResponse(format!(
            "{endpoint} returned {status}: {}",
            String::from_utf8_lossy(&body)
        )))
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let endpoint = self.api_endpoint("health")?;
        let response = expect_success(&endpoint, self.get(&endpoint).await?).await?;
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        match body.trim().trim_matches('"') {
            HealthStatus::HEALTHY => Ok(HealthStatus::Healthy),
            other => Err(ClientError::UnexpectedResponse(format!(
                "health body {other:?}"
            ))),
        }
    }

    async fn status(&self) -> Result<Status, ClientError> {
        let endpoint = self.telemetry_endpoint("status")?;
        let response = expect_success(&endpoint, self.get(&endpoint).await?).await?;
        response
            .json::<Status>()
            .await
            .map_err(|e| ClientError::UnexpectedResponse(format!("status body: {e}")))
    }

    async fn metrics(&self) -> Result<String, ClientError> {
        let endpoint = self.telemetry_endpoint("metrics")?;
        let response = expect_success(&endpoint, self.get(&endpoint).await?).await?;
        response
            .text()
            .await
            .map_err(|e| transport_error(&endpoint, e))
    }
}
