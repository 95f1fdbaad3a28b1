//! Provider and localnet configuration.

use crate::TestCluster;
use sc_02_localnet::{ConfigError, LocalnetConfig, LocalnetError, LocalnetService};
use sc_03_client::config::{ENV_COMMITMENT, ENV_PROVIDER_URL, ENV_RPC_TIMEOUT_MS, ENV_WALLET};
use sc_03_client::{ClientError, Commitment, Provider, ProviderConfig};
use std::time::Duration;

#[test]
fn test_localnet_rejects_zero_limits() {
    let mut config = LocalnetConfig::default();
    config.limits.max_request_size = 0;
    assert!(matches!(
        LocalnetService::new(config),
        Err(LocalnetError::Config(ConfigError::InvalidLimit(_)))
    ));

    let mut config = LocalnetConfig::default();
    config.limits.max_batch_size = 0;
    assert!(matches!(
        LocalnetService::new(config),
        Err(LocalnetError::Config(ConfigError::InvalidLimit(_)))
    ));
}

#[test]
fn test_provider_config_overrides() {
    let config = ProviderConfig::from_lookup(|key| match key {
        ENV_PROVIDER_URL => Some("http://127.0.0.1:8899".into()),
        ENV_WALLET => Some("/tmp/id.json".into()),
        ENV_COMMITMENT => Some("processed".into()),
        ENV_RPC_TIMEOUT_MS => Some("1500".into()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.commitment, Commitment::Processed);
    assert_eq!(config.timeout, Duration::from_millis(1500));

    let err = ProviderConfig::from_lookup(|key| match key {
        ENV_PROVIDER_URL => Some("http://127.0.0.1:8899".into()),
        _ => None,
    })
    .unwrap_err();
    assert!(matches!(err, ClientError::Config(ref m) if m.contains(ENV_WALLET)));
}

#[tokio::test]
async fn test_harness_wallet_file_round_trips() {
    let cluster = TestCluster::start().await.unwrap();

    let provider =
        Provider::from_config(ProviderConfig::new(cluster.url(), cluster.wallet_path())).unwrap();
    assert_eq!(
        provider.wallet().pubkey(),
        cluster.provider().wallet().pubkey()
    );
    assert!(cluster.root().join("target/idl/supercollab.json").exists());

    cluster.shutdown().await.unwrap();
}
