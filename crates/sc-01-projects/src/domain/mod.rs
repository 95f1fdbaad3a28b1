//! # Domain Layer (Inner Hexagon)
//!
//! Pure business types for the project registry.
//! NO I/O, NO async.

pub mod entities;
pub mod invariants;

pub use entities::*;
pub use invariants::*;
