//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the program and its host.
//!
//! - **Driving Port (Inbound)**: `ProgramApi`, called by the cluster
//! - **Driven Port (Outbound)**: `AccountStore`, provided by the cluster

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
