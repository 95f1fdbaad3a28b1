//! Provider configuration.
//!
//! Built explicitly with [`ProviderConfig::new`] or read from the environment
//! with [`ProviderConfig::from_env`]:
//!
//! - `ANCHOR_PROVIDER_URL`: cluster RPC endpoint (required)
//! - `ANCHOR_WALLET`: path to the payer's keypair file (required)
//! - `ANCHOR_COMMITMENT`: `processed`, `confirmed` or `finalized` (default: `confirmed`)
//! - `ANCHOR_RPC_TIMEOUT_MS`: HTTP timeout in milliseconds (default: 30000)

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_PROVIDER_URL: &str = "ANCHOR_PROVIDER_URL";
pub const ENV_WALLET: &str = "ANCHOR_WALLET";
pub const ENV_COMMITMENT: &str = "ANCHOR_COMMITMENT";
pub const ENV_RPC_TIMEOUT_MS: &str = "ANCHOR_RPC_TIMEOUT_MS";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How settled a transaction must be before it counts as confirmed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(ClientError::Config(format!(
                "unknown commitment level: {other}"
            ))),
        }
    }
}

/// How to reach the cluster and who pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Cluster JSON-RPC endpoint.
    pub url: String,
    /// Payer keypair file.
    pub wallet_path: PathBuf,
    pub commitment: Commitment,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Configuration with default commitment and timeout.
    pub fn new(url: impl Into<String>, wallet_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            wallet_path: wallet_path.into(),
            commitment: Commitment::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` if it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ClientError::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(required(ENV_PROVIDER_URL)?, required(ENV_WALLET)?);

        if let Some(commitment) = lookup(ENV_COMMITMENT) {
            config.commitment = commitment.parse()?;
        }
        if let Some(ms) = lookup(ENV_RPC_TIMEOUT_MS) {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                ClientError::Config(format!("{ENV_RPC_TIMEOUT_MS} must be an integer, got {ms:?}"))
            })?;
            config.timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "provider url must be http(s): {}",
                self.url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout cannot be 0".into()));
        }
        Ok(())
    }
}
