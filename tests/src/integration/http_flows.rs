//! # HTTP Flows
//!
//! The registration sequence through `HttpTransport` and the mock Torii.
//!
//! ## Flows Tested:
//!
//! 1. **Register and confirm**: `looking_glass`, 200 ms wait, domain found
//! 2. **Telemetry**: health, status and metrics on their own ports
//! 3. **Error mapping**: refused signer, refused query, missing endpoint,
//!    unreachable node

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use domain_registrar::{build_client, derive_key_pair, Registrar, RegistrarError};
    use ledger_client::adapters::memory::DEFAULT_BLOCK_TIME;
    use ledger_client::{
        Client, ClientConfig, ClientError, CommitWait, InMemoryLedger, LedgerClientApi,
        ToriiConfig, Url,
    };
    use shared_crypto::{KeyMaterial, KeyPair};
    use shared_types::{
        AccountId, DomainId, HealthStatus, IdentifiableBox, QueryBox, QueryError,
        TransactionStatus, Value,
    };

    use crate::mock_torii::MockTorii;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ALICE_PUBLIC: &str =
        "ed01207233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";
    const ALICE_PRIVATE: &str = "9ac47abf59b356e0bd7dcbbbb4dec080e302156a48ca907e47cb6aea1d32719e7233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";

    fn alice() -> AccountId {
        "alice@wonderland".parse().unwrap()
    }

    fn alice_key_pair() -> KeyPair {
        derive_key_pair(&KeyMaterial::new(ALICE_PUBLIC, "ed25519", ALICE_PRIVATE)).unwrap()
    }

    /// Mock peer whose genesis knows alice's key.
    async fn spawn_peer() -> MockTorii {
        let ledger = Arc::new(InMemoryLedger::with_account(
            DEFAULT_BLOCK_TIME,
            alice(),
            alice_key_pair().public_key().clone(),
        ));
        MockTorii::spawn(ledger).await.unwrap()
    }

    fn client_for(torii: ToriiConfig, key_pair: KeyPair) -> Client {
        build_client(ClientConfig::new(torii, alice(), key_pair)).unwrap()
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[tokio::test]
    async fn test_register_looking_glass_end_to_end() {
        let peer = spawn_peer().await;
        let registrar = Registrar::new(client_for(peer.torii(), alice_key_pair()));

        let hash = registrar
            .run("looking_glass", &CommitWait::default())
            .await
            .unwrap();

        let id: DomainId = "looking_glass".parse().unwrap();
        let value = registrar
            .client()
            .request(QueryBox::FindDomainById { id })
            .await
            .unwrap();
        match value {
            Value::Identifiable(IdentifiableBox::Domain(domain)) => {
                assert_eq!(domain.id.name.as_str(), "looking_glass");
                assert!(domain.metadata.is_empty());
                assert!(domain.logo.is_none());
            }
            other => panic!("expected a domain, got {other:?}"),
        }

        let status = registrar.client().transaction_status(hash).await.unwrap();
        assert!(matches!(status, TransactionStatus::Committed { .. }));
    }

    #[tokio::test]
    async fn test_polling_over_http() {
        let peer = spawn_peer().await;
        let registrar = Registrar::new(client_for(peer.torii(), alice_key_pair()));

        let poll = CommitWait::poll(Duration::from_millis(25), 40);
        registrar.run("polled_domain", &poll).await.unwrap();
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    #[tokio::test]
    async fn test_health_status_metrics() {
        let peer = spawn_peer().await;
        let client = client_for(peer.torii(), alice_key_pair());

        assert_eq!(client.health().await.unwrap(), HealthStatus::Healthy);

        let registrar = Registrar::new(client);
        registrar
            .run("looking_glass", &CommitWait::default())
            .await
            .unwrap();

        let status = registrar.client().status().await.unwrap();
        assert_eq!(status.blocks, 1);
        assert_eq!(status.txs_accepted, 1);
        assert_eq!(status.txs_rejected, 0);

        let metrics = registrar.client().metrics().await.unwrap();
        assert!(metrics.contains("block_height 1"));
        assert!(metrics.contains("domains 2"));
    }

    #[tokio::test]
    async fn test_missing_telemetry_endpoint() {
        let peer = spawn_peer().await;
        let client = client_for(ToriiConfig::api_only(peer.api_url()), alice_key_pair());

        assert!(client.health().await.is_ok());
        assert!(matches!(
            client.status().await,
            Err(ClientError::MissingEndpoint("telemetry"))
        ));
    }

    // =============================================================================
    // ERROR MAPPING
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_signer_is_refused() {
        let peer = spawn_peer().await;
        let registrar = Registrar::new(client_for(peer.torii(), KeyPair::generate()));

        match registrar.register_domain("looking_glass").await {
            Err(RegistrarError::Submission(ClientError::TransactionRejected(reason))) => {
                assert!(reason.contains("signatory"), "reason: {reason}");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(peer.ledger().node_status().txs_rejected, 1);
    }

    #[tokio::test]
    async fn test_query_refusal_decoded() {
        let peer = spawn_peer().await;
        let registrar = Registrar::new(client_for(peer.torii(), KeyPair::generate()));

        assert!(matches!(
            registrar.ensure_domain_existence("wonderland").await,
            Err(RegistrarError::Query(ClientError::QueryRejected(
                QueryError::Permission(_)
            )))
        ));
    }

    #[tokio::test]
    async fn test_unregistered_domain_not_found() {
        let peer = spawn_peer().await;
        let registrar = Registrar::new(client_for(peer.torii(), alice_key_pair()));

        assert!(matches!(
            registrar.ensure_domain_existence("looking_glass").await,
            Err(RegistrarError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}")).unwrap();
        let registrar = Registrar::new(client_for(ToriiConfig::api_only(url), alice_key_pair()));

        match registrar.ensure_domain_existence("looking_glass").await {
            Err(RegistrarError::Query(err)) => assert!(err.is_transport(), "error: {err}"),
            other => panic!("expected transport failure, got {other:?}"),
        }
        assert!(matches!(
            registrar.register_domain("looking_glass").await,
            Err(RegistrarError::Submission(ClientError::Transport(_)))
        ));
    }
}
