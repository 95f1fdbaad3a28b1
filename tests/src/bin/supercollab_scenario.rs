//! `supercollab-scenario` - runs the "Is initialized!" scenario against the
//! cluster named by `ANCHOR_PROVIDER_URL`, paying with `ANCHOR_WALLET`.
//!
//! The program is resolved from `./target/idl`. Any failure exits non-zero.

use anyhow::{Context, Result};
use sc_03_client::{Provider, ProviderConfig, Workspace};
use sc_tests::{is_initialized, PROGRAM};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ProviderConfig::from_env().context("provider configuration")?;
    let provider = Provider::from_config(config).context("provider")?;
    let program = Workspace::discover(".")
        .context("workspace")?
        .program(PROGRAM, Arc::new(provider))?;

    is_initialized(&program, &mut std::io::stdout()).await?;
    Ok(())
}
