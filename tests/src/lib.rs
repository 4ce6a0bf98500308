//! # Ledger-Trust Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deterministic keys shared by tests and benches
//! ├── benchmarks/       # Criterion benchmark bodies
//! │   └── satisfaction.rs
//! │
//! └── integration/      # Cross-crate authorization scenarios
//!     ├── authorization_flows.rs
//!     ├── identifiers.rs
//!     ├── telemetry.rs
//!     └── wire_compat.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p trust-tests
//!
//! # By category
//! cargo test -p trust-tests integration::
//!
//! # Benchmarks
//! cargo bench -p trust-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
