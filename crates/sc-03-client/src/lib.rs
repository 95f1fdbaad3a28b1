//! # SC-03 Client - Program Client SDK
//!
//! Connects to a cluster, resolves programs by name from their IDLs and calls
//! their instructions.
//!
//! ## Flow
//!
//! ```text
//! ProviderConfig ──► Provider ─────────────┐
//!  (explicit or       (wallet + RpcClient) │
//!   ANCHOR_* env)                          ▼
//! Workspace ──── program("Supercollab") ─► Program ─► method("initialize")
//!  (target/idl/*.json)                                    │
//!                                                         ▼
//!                           MethodBuilder ─ args / accounts / signers
//!                                                         │
//!                                         rpc(): one sendTransaction
//!                                                         │
//!                                                         ▼
//!                                                    TxSignature
//! ```
//!
//! ## Failure Model
//!
//! Nothing is retried. A call either returns the transaction signature or the
//! first error encountered; [`ClientError::is_remote_call_failure`] tells
//! cluster-side failures apart from local ones.
//!
//! ## Usage Example
//!
//! ```ignore
//! use sc_03_client::prelude::*;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(Provider::env()?);
//! let program = Workspace::discover(".")?.program("Supercollab", provider)?;
//! let signature = program.method("initialize")?.rpc().await?;
//! println!("Your transaction signature {signature}");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod coder;
pub mod config;
pub mod error;
pub mod program;
pub mod provider;
pub mod rpc;
pub mod wallet;
pub mod workspace;

pub use config::{Commitment, ProviderConfig};
pub use error::ClientError;
pub use program::{MethodBuilder, Program};
pub use provider::Provider;
pub use rpc::RpcClient;
pub use wallet::Keypair;
pub use workspace::Workspace;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::{Commitment, ProviderConfig};
    pub use crate::error::ClientError;
    pub use crate::program::{MethodBuilder, Program};
    pub use crate::provider::Provider;
    pub use crate::rpc::{AccountData, RpcClient, SignatureStatus, TransactionDetails};
    pub use crate::wallet::Keypair;
    pub use crate::workspace::Workspace;
    pub use shared_types::{Pubkey, TxSignature};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
