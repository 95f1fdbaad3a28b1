//! # Integration Tests
//!
//! Each module spins up its own [`TestCluster`](crate::TestCluster) on an
//! OS-assigned port, so tests run in parallel without sharing state.
//!
//! | Module | Covers |
//! |--------|--------|
//! | `scenario` | The `initialize` scenario: output line, single call, failure propagation |
//! | `projects` | `create_project` and `update_project_state` end to end |
//! | `transactions` | Signature checks, replays and status queries |
//! | `config` | Provider and localnet configuration |

#[cfg(test)]
mod config;
#[cfg(test)]
mod projects;
#[cfg(test)]
mod scenario;
#[cfg(test)]
mod transactions;
