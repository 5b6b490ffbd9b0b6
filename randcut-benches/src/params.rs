//! Benchmark parameter types.
//!
//! Each type renders a compact label used as the Criterion benchmark id.

use std::fmt;

/// Parameters for a single-cut or trial-batch benchmark run.
#[derive(Clone, Debug)]
pub struct CutBenchParams {
    /// Short name of the graph family.
    pub shape: &'static str,
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of directed edges in the graph.
    pub edge_count: usize,
}

impl fmt::Display for CutBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},n={},m={}",
            self.shape, self.node_count, self.edge_count
        )
    }
}

/// Parameters for a rebuild-policy sweep run.
#[derive(Clone, Debug)]
pub struct PolicyBenchParams {
    /// Draws that must pass before a ratio-driven rebuild.
    pub min_calls: u64,
    /// Rejected draws per call that trigger a rebuild.
    pub max_rejection_ratio: f64,
}

impl fmt::Display for PolicyBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "calls={},ratio={}",
            self.min_calls, self.max_rejection_ratio
        )
    }
}
