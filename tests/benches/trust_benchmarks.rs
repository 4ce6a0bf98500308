//! # Ledger-Trust Benchmarks
//!
//! | Area | Claim | Target |
//! |------|-------|--------|
//! | Satisfaction | Single key check | < 100µs |
//! | Satisfaction | 64-wide threshold | linear in width |
//! | Signing | Composite of 32 local keys | < 5ms |

use criterion::{criterion_group, criterion_main, Criterion};
use trust_tests::benchmarks::satisfaction;

fn bench_all(c: &mut Criterion) {
    satisfaction::register_benchmarks(c);
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
