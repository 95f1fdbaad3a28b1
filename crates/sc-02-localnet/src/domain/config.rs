//! Localnet configuration with validation.
//!
//! Defaults match a developer cluster on `127.0.0.1:8899`. Every field can be
//! overridden from the environment with [`LocalnetConfig::apply_env`].

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::warn;

/// Environment variable overriding `rpc.host`.
pub const ENV_RPC_HOST: &str = "SC_RPC_HOST";
/// Environment variable overriding `rpc.port`.
pub const ENV_RPC_PORT: &str = "SC_RPC_PORT";
/// Environment variable overriding `idl_dir`.
pub const ENV_IDL_DIR: &str = "SC_IDL_DIR";
/// Environment variable overriding `limits.max_request_size`.
pub const ENV_MAX_REQUEST_SIZE: &str = "SC_MAX_REQUEST_SIZE";

/// Main localnet configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalnetConfig {
    /// JSON-RPC server configuration
    pub rpc: RpcConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Directory the program IDLs are written to at startup
    pub idl_dir: Option<PathBuf>,
}

impl LocalnetConfig {
    /// Reads the defaults and applies environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Applies environment overrides. Unparseable values are logged and ignored.
    pub fn apply_env(&mut self) {
        if let Ok(host) = env::var(ENV_RPC_HOST) {
            match host.parse() {
                Ok(h) => self.rpc.host = h,
                Err(_) => warn!(var = ENV_RPC_HOST, value = %host, "ignoring invalid host"),
            }
        }
        if let Ok(port) = env::var(ENV_RPC_PORT) {
            match port.parse() {
                Ok(p) => self.rpc.port = p,
                Err(_) => warn!(var = ENV_RPC_PORT, value = %port, "ignoring invalid port"),
            }
        }
        if let Ok(dir) = env::var(ENV_IDL_DIR) {
            if !dir.is_empty() {
                self.idl_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(size) = env::var(ENV_MAX_REQUEST_SIZE) {
            match size.parse() {
                Ok(s) => self.limits.max_request_size = s,
                Err(_) => warn!(var = ENV_MAX_REQUEST_SIZE, value = %size, "ignoring invalid size"),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.limits.max_batch_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_batch_size cannot be 0".into(),
            ));
        }

        if let Some(dir) = &self.idl_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("idl_dir cannot be empty".into()));
            }
        }

        Ok(())
    }

    /// Get RPC server bind address
    pub fn rpc_addr(&self) -> SocketAddr {
        SocketAddr::new(self.rpc.host, self.rpc.port)
    }
}

/// JSON-RPC server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8899, 0 binds an ephemeral port)
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8899,
        }
    }
}

/// Request validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 64 KiB)
    pub max_request_size: usize,
    /// Max number of requests in a batch
    pub max_batch_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 64 * 1024,
            max_batch_size: 20,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = LocalnetConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rpc_addr().to_string(), "127.0.0.1:8899");
        assert!(config.idl_dir.is_none());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = LocalnetConfig::default();
        config.limits.max_request_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLimit(_))));

        let mut config = LocalnetConfig::default();
        config.limits.max_batch_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLimit(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LocalnetConfig =
            serde_json::from_str(r#"{ "rpc": { "port": 0 } }"#).unwrap();
        assert_eq!(config.rpc.port, 0);
        assert_eq!(config.rpc.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.limits.max_batch_size, 20);
    }

    #[test]
    fn test_env_overrides() {
        // The only test in this crate that touches these variables.
        env::set_var(ENV_RPC_PORT, "9911");
        env::set_var(ENV_RPC_HOST, "0.0.0.0");
        env::set_var(ENV_IDL_DIR, "/tmp/idl");
        env::set_var(ENV_MAX_REQUEST_SIZE, "not-a-number");

        let config = LocalnetConfig::from_env();

        env::remove_var(ENV_RPC_PORT);
        env::remove_var(ENV_RPC_HOST);
        env::remove_var(ENV_IDL_DIR);
        env::remove_var(ENV_MAX_REQUEST_SIZE);

        assert_eq!(config.rpc.port, 9911);
        assert_eq!(config.rpc.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.idl_dir, Some(PathBuf::from("/tmp/idl")));
        assert_eq!(config.limits.max_request_size, 64 * 1024);
    }
}
