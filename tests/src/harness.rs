//! Test harness: an in-process localnet plus a provider and workspace that
//! point at it.
//!
//! Everything lives in a scratch directory laid out like a project checkout:
//!
//! ```text
//! <tmp>/
//! ├── id.json               # payer keypair
//! └── target/idl/
//!     └── supercollab.json  # written by the localnet on start
//! ```

use crate::scenario::PROGRAM;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use sc_02_localnet::{Bank, LocalnetConfig, LocalnetHandle, LocalnetService, StatsSnapshot};
use sc_03_client::{Keypair, Program, Provider, ProviderConfig, Workspace};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A running localnet with a fresh payer wallet and a loaded workspace.
pub struct TestCluster {
    root: TempDir,
    handle: LocalnetHandle,
    provider: Arc<Provider>,
    workspace: Workspace,
}

impl TestCluster {
    /// Starts a localnet on an OS-assigned port.
    pub async fn start() -> Result<Self> {
        init_tracing();
        let root = tempfile::tempdir().context("creating scratch directory")?;

        let mut config = LocalnetConfig::default();
        config.rpc.port = 0;
        config.idl_dir = Some(root.path().join("target").join("idl"));
        let handle = LocalnetService::new(config)?.spawn().await?;

        let wallet_path = root.path().join("id.json");
        Keypair::generate().write_file(&wallet_path)?;

        let provider = Provider::from_config(ProviderConfig::new(handle.url(), &wallet_path))?;
        let workspace = Workspace::discover(root.path())?;
        debug!(url = %handle.url(), root = %root.path().display(), "test cluster ready");

        Ok(Self {
            root,
            handle,
            provider: Arc::new(provider),
            workspace,
        })
    }

    /// The program the scenario targets.
    pub fn program(&self) -> Result<Program> {
        Ok(self.workspace.program(PROGRAM, Arc::clone(&self.provider))?)
    }

    pub fn provider(&self) -> Arc<Provider> {
        Arc::clone(&self.provider)
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn url(&self) -> String {
        self.handle.url()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn wallet_path(&self) -> PathBuf {
        self.root.path().join("id.json")
    }

    /// Request and transaction counters of the localnet.
    pub fn stats(&self) -> StatsSnapshot {
        self.handle.stats()
    }

    pub fn bank(&self) -> Arc<RwLock<Bank>> {
        self.handle.bank()
    }

    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        Ok(())
    }
}
