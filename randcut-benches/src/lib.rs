//! Benchmark support crate for randcut.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for single cuts, trial batches and sampler rebuild policies.

pub mod error;
pub mod params;
pub mod source;
