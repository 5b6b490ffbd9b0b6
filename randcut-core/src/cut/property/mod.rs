//! Property-based tests for the cut driver.
//!
//! Generates weighted graphs across several topologies and checks the
//! structural invariants of a completed run: forest acyclicity, terminal
//! stability, weight conservation, partition validity and determinism under
//! a fixed seed.

mod invariants;
mod strategies;
mod types;
