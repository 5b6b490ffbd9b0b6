//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?` instead of panicking.

use randcut_core::CutError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Cut configuration or execution failed.
    #[error("cut failed: {0}")]
    Cut(#[from] CutError),
}
