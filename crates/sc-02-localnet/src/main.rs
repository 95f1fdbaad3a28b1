//! `sc-localnet` - runs the local test cluster until Ctrl+C.
//!
//! Configuration comes from the environment (`SC_RPC_HOST`, `SC_RPC_PORT`,
//! `SC_IDL_DIR`, `SC_MAX_REQUEST_SIZE`). Log filtering uses `RUST_LOG`.

use anyhow::{Context, Result};
use sc_02_localnet::{LocalnetConfig, LocalnetService};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut config = LocalnetConfig::from_env();
    if config.idl_dir.is_none() {
        config.idl_dir = Some(PathBuf::from("target").join("idl"));
    }

    let handle = LocalnetService::new(config)
        .context("invalid localnet configuration")?
        .spawn()
        .await
        .context("failed to start localnet")?;

    info!(url = %handle.url(), "Localnet is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    handle.shutdown().await?;
    Ok(())
}
