//! # Repeated Registration
//!
//! Registering a name twice is acknowledged at submission and rejected in the
//! block; the domain record stays single. Resubmitting the exact same signed
//! transaction is refused at submission.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain_registrar::{build_client, Registrar};
    use ledger_client::adapters::memory::DEFAULT_BLOCK_TIME;
    use ledger_client::{
        ClientConfig, ClientError, CommitWait, InMemoryLedger, LedgerClientApi, LedgerTransport,
    };
    use shared_crypto::KeyPair;
    use shared_types::{
        AccountId, DomainId, Executable, Instruction, NewDomain, QueryBox, RegisterBox,
        TransactionStatus,
    };

    use crate::mock_torii::MockTorii;

    fn alice() -> AccountId {
        "alice@wonderland".parse().unwrap()
    }

    async fn setup() -> (MockTorii, Registrar<ledger_client::Client>) {
        let key_pair = KeyPair::generate();
        let ledger = Arc::new(InMemoryLedger::with_account(
            DEFAULT_BLOCK_TIME,
            alice(),
            key_pair.public_key().clone(),
        ));
        let peer = MockTorii::spawn(ledger).await.unwrap();
        let client = build_client(ClientConfig::new(peer.torii(), alice(), key_pair)).unwrap();
        (peer, Registrar::new(client))
    }

    #[tokio::test]
    async fn test_second_registration_rejected_at_commit() {
        let (peer, registrar) = setup().await;
        let wait = CommitWait::default();

        registrar.run("looking_glass", &wait).await.unwrap();
        // Acknowledged, and the existence check still passes.
        let second = registrar.run("looking_glass", &wait).await.unwrap();

        match registrar.client().transaction_status(second).await.unwrap() {
            TransactionStatus::Rejected { reason } => {
                assert!(reason.starts_with("repetition"), "reason: {reason}");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let all = registrar
            .client()
            .request(QueryBox::FindAllDomains)
            .await
            .unwrap();
        let count = all
            .domains()
            .unwrap()
            .iter()
            .filter(|d| d.id.name.as_str() == "looking_glass")
            .count();
        assert_eq!(count, 1);

        let status = peer.ledger().node_status();
        assert_eq!(status.txs_accepted, 1);
        assert_eq!(status.txs_rejected, 1);
    }

    #[tokio::test]
    async fn test_identical_transaction_refused_at_submission() {
        let (_peer, registrar) = setup().await;
        let client = registrar.client();

        let id: DomainId = "looking_glass".parse().unwrap();
        let register = Instruction::Register(RegisterBox::domain(NewDomain::new(id)));
        let tx = client
            .build_transaction(Executable::single(register))
            .unwrap();

        client
            .transport()
            .submit_transaction(tx.clone().into())
            .await
            .unwrap();
        match client.transport().submit_transaction(tx.into()).await {
            Err(ClientError::TransactionRejected(reason)) => {
                assert!(reason.contains("already submitted"), "reason: {reason}");
            }
            other => panic!("expected duplicate refusal, got {other:?}"),
        }
    }
}
