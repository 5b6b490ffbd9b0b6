//! Shared test utilities used across randcut crates.

pub mod ci;
pub mod tracing;
