//! # Integration Scenarios
//!
//! End-to-end checks across trust-crypto, trust-core and trust-telemetry.

pub mod authorization_flows;
pub mod identifiers;
pub mod telemetry;
pub mod wire_compat;
