//! SC-02 Localnet - Local test cluster for the supercollab program.
//!
//! Hosts the program behind a JSON-RPC 2.0 endpoint so clients can run
//! against it exactly as they would against a remote cluster.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                LOCALNET (sc-02)               │
//! ├──────────────────────────────────────────────┤
//! │  HTTP POST /  (JSON-RPC, single and batch)    │
//! │  GET /health                                  │
//! │        │                                      │
//! │  ┌─────┴──────────────────────────┐           │
//! │  │  router: method → handler       │           │
//! │  └─────┬──────────────────────────┘           │
//! │        │  RwLock (writes serialized)          │
//! │  ┌─────┴──────────────────────────┐           │
//! │  │  Bank: accounts, slot, records  │           │
//! │  │        hosted programs          │           │
//! │  └────────────────────────────────┘           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Methods
//!
//! | Method | Result |
//! |--------|--------|
//! | `getHealth` | `"ok"` |
//! | `getVersion` | version object |
//! | `getSlot` | last committed slot |
//! | `sendTransaction` | signature, after commit |
//! | `getSignatureStatuses` | status per signature, or null |
//! | `getTransaction` | slot, logs and events, or null |
//! | `getAccountInfo` | owner, hex data and size, or null |
//!
//! # Usage
//!
//! ```ignore
//! use sc_02_localnet::{LocalnetConfig, LocalnetService};
//!
//! let mut config = LocalnetConfig::default();
//! config.rpc.port = 0;
//! let handle = LocalnetService::new(config)?.spawn().await?;
//! println!("listening on {}", handle.url());
//! handle.shutdown().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod bank;
pub mod domain;
pub mod router;
pub mod service;

pub use bank::{Bank, TransactionFailure};
pub use domain::config::{ConfigError, LimitsConfig, LocalnetConfig, RpcConfig};
pub use domain::error::{codes, ApiError, ApiResult, LocalnetError};
pub use domain::ledger::{
    AccountInfo, ConfirmationStatus, InstructionError, LocalnetStats, SignatureStatus,
    StatsSnapshot, TransactionError, TransactionRecord,
};
pub use service::{write_idl, LocalnetHandle, LocalnetService};

/// Crate version, reported by `getVersion`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
