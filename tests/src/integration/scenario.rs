//! The `initialize` scenario against a live localnet.

use crate::{is_initialized, TestCluster};
use sc_03_client::{ClientError, Keypair, Program, Provider, ProviderConfig};
use shared_types::Pubkey;
use std::sync::Arc;
use std::time::Duration;

fn client_error(err: &anyhow::Error) -> &ClientError {
    err.downcast_ref::<ClientError>()
        .unwrap_or_else(|| panic!("expected a client error, got {err:#}"))
}

#[tokio::test]
async fn test_initialize_prints_signature() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();

    let mut out = Vec::new();
    let signature = is_initialized(&program, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed, format!("Your transaction signature {signature}\n"));
    assert_eq!(signature.to_string().len(), 128);

    let bank = cluster.bank();
    let bank = bank.read();
    let record = bank.record(&signature).expect("committed transaction is recorded");
    assert!(record.err.is_none());
    assert!(record.logs.iter().any(|l| l == "Program log: Instruction: Initialize"));
    drop(bank);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exactly_one_remote_call() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();

    is_initialized(&program, &mut Vec::new()).await.unwrap();

    let stats = cluster.stats();
    assert_eq!(stats.requests_served, 1);
    assert_eq!(stats.transactions_received, 1);
    assert_eq!(stats.transactions_committed, 1);
    assert_eq!(program.provider().rpc().requests_sent(), 1);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remote_rejection_propagates_without_retry() {
    let cluster = TestCluster::start().await.unwrap();

    // Same interface, but an address the cluster does not host.
    let mut idl = cluster.program().unwrap().idl().clone();
    idl.address = Pubkey::new([0x55; 32]);
    let program = Program::new(idl, cluster.provider());

    let mut out = Vec::new();
    let err = is_initialized(&program, &mut out).await.unwrap_err();

    let err = client_error(&err);
    assert!(err.is_remote_call_failure());
    assert!(matches!(err, ClientError::Rpc { code: -32002, .. }));
    assert!(out.is_empty());

    let stats = cluster.stats();
    assert_eq!(stats.requests_served, 1);
    assert_eq!(stats.transactions_failed, 1);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_cluster_propagates() {
    let cluster = TestCluster::start().await.unwrap();
    let idl = cluster.program().unwrap().idl().clone();
    cluster.shutdown().await.unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ProviderConfig::new(format!("http://{addr}"), "id.json");
    config.timeout = Duration::from_secs(2);
    let provider = Provider::new(config, Keypair::generate()).unwrap();
    let program = Program::new(idl, Arc::new(provider));

    let mut out = Vec::new();
    let err = is_initialized(&program, &mut out).await.unwrap_err();
    assert!(matches!(client_error(&err), ClientError::Transport(_)));
    assert!(out.is_empty());
    assert_eq!(program.provider().rpc().requests_sent(), 1);
}

#[test]
fn test_missing_configuration_fails() {
    let err = ProviderConfig::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));

    let config = ProviderConfig::new("http://127.0.0.1:8899", "/does/not/exist/id.json");
    assert!(matches!(
        Provider::from_config(config),
        Err(ClientError::Wallet(_))
    ));
}

#[tokio::test]
async fn test_program_resolved_by_name() {
    let cluster = TestCluster::start().await.unwrap();
    let workspace = cluster.workspace();

    assert_eq!(workspace.program_names(), vec!["supercollab"]);
    for name in ["Supercollab", "supercollab"] {
        let program = workspace.program(name, cluster.provider()).unwrap();
        assert_eq!(program.id(), sc_01_projects::ids::PROGRAM_ID);
    }
    assert!(matches!(
        workspace.program("Collab", cluster.provider()),
        Err(ClientError::ProgramNotFound(_))
    ));

    cluster.shutdown().await.unwrap();
}
