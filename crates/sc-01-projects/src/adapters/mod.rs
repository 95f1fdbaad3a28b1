//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete account stores.

pub mod in_memory;

pub use in_memory::{InMemoryAccounts, StagedAccounts};
