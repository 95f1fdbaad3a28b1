//! Transaction admission: signatures, replays and status queries.

use crate::TestCluster;
use sc_02_localnet::codes;
use sc_03_client::{ClientError, Commitment};
use shared_types::TxSignature;

#[tokio::test]
async fn test_tampered_signature_rejected() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();

    let mut tx = program.method("initialize").unwrap().transaction().unwrap();
    tx.signatures[0].0[0] ^= 0x01;

    let err = program.provider().send_and_confirm(&tx).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rpc { code, .. } if code == i64::from(codes::SIGNATURE_VERIFICATION_FAILURE)
    ));
    assert_eq!(cluster.stats().transactions_failed, 1);
    assert_eq!(cluster.bank().read().transaction_count(), 0);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();

    let mut tx = program.method("initialize").unwrap().transaction().unwrap();
    tx.signatures.clear();

    let err = program.provider().rpc().send_transaction(&tx).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rpc { code, .. } if code == i64::from(codes::SIGNATURE_VERIFICATION_FAILURE)
    ));

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_replay_rejected() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let provider = program.provider();

    let tx = program.method("initialize").unwrap().transaction().unwrap();
    provider.send_and_confirm(&tx).await.unwrap();
    let slot = cluster.bank().read().slot();

    let err = provider.send_and_confirm(&tx).await.unwrap_err();
    let ClientError::Rpc { code, data, .. } = &err else {
        panic!("expected an RPC error, got {err:?}");
    };
    assert_eq!(*code, i64::from(codes::TRANSACTION_SIMULATION_FAILED));
    assert_eq!(data.as_ref().unwrap()["err"], "AlreadyProcessed");
    assert_eq!(err.custom_program_error(), None);

    assert_eq!(cluster.bank().read().slot(), slot);
    assert_eq!(cluster.bank().read().transaction_count(), 1);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_signature_status_and_details() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let provider = program.provider();

    let signature = program.method("initialize").unwrap().rpc().await.unwrap();

    let statuses = provider
        .rpc()
        .get_signature_statuses(&[signature, TxSignature::new([0; 64])])
        .await
        .unwrap();
    let status = statuses[0].as_ref().unwrap();
    assert_eq!(status.slot, 1);
    assert!(status.err.is_none());
    assert!(status.satisfies(Commitment::Finalized));
    assert!(statuses[1].is_none());
    assert!(provider.confirm_transaction(&signature).await.unwrap());

    let details = provider.rpc().get_transaction(&signature).await.unwrap().unwrap();
    assert_eq!(details.slot, 1);
    assert!(details.events.is_empty());
    assert_eq!(
        details.logs.first().map(String::as_str),
        Some(format!("Program {} invoke [1]", program.id()).as_str())
    );
    assert_eq!(provider.rpc().get_slot().await.unwrap(), 1);

    cluster.shutdown().await.unwrap();
}
