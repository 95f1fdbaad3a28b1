//! # Supercollab Test Suite
//!
//! The `initialize` scenario, the harness that runs it against an in-process
//! localnet, and the integration tests around it.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── scenario.rs       # "Is initialized!" scenario
//! ├── harness.rs        # Localnet + wallet + workspace in a temp dir
//! ├── bin/
//! │   └── supercollab_scenario.rs  # Runs the scenario from ANCHOR_* env
//! │
//! └── integration/      # Scenario, program and cluster behaviour
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By category
//! cargo test -p sc-tests integration::scenario::
//! cargo test -p sc-tests integration::projects::
//!
//! # Against a running cluster
//! ANCHOR_PROVIDER_URL=http://127.0.0.1:8899 ANCHOR_WALLET=~/.config/id.json \
//!     cargo run -p sc-tests --bin supercollab-scenario
//! ```

pub mod harness;
pub mod integration;
pub mod scenario;

pub use harness::{init_tracing, TestCluster};
pub use scenario::{is_initialized, PROGRAM};
