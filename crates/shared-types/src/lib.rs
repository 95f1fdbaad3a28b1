//! # Shared Types Crate
//!
//! Wire types shared by the supercollab program, the local test cluster and
//! the client SDK.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses the RPC boundary is
//!   defined here, so the cluster and the client can never disagree on layout.
//! - **Two Encodings**: binary payloads (instruction data, account data,
//!   transactions) use `bincode`; JSON renders keys and signatures as lowercase
//!   hex strings.
//! - **Interface Descriptors**: programs publish an [`Idl`] that clients use to
//!   resolve them by name and to encode calls.

pub mod entities;
pub mod errors;
pub mod idl;

pub use entities::*;
pub use errors::*;
pub use idl::*;
