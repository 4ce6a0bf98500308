//! # Ledger-Trust Benchmarks
//!
//! Criterion bodies registered by `benches/trust_benchmarks.rs`.
