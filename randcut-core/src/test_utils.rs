//! Shared test utilities for `randcut-core`.

use randcut_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    cut::{RebuildReport, RunStats},
    graph::{EdgeCost, EdgeId, Graph, NodeId},
    observer::CutObserver,
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `RANDCUT_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// In-memory weighted edge list used by unit and property tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TestGraph {
    node_count: usize,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl TestGraph {
    #[must_use]
    pub(crate) fn new(node_count: usize, edges: Vec<(NodeId, NodeId, f64)>) -> Self {
        Self { node_count, edges }
    }

    /// Builds a graph whose edges all weigh `1.0`.
    #[must_use]
    pub(crate) fn unit(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        Self::new(
            node_count,
            edges.iter().map(|&(a, b)| (a, b, 1.0)).collect(),
        )
    }

    #[must_use]
    pub(crate) fn edges(&self) -> &[(NodeId, NodeId, f64)] {
        &self.edges
    }
}

impl Graph for TestGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_a(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].0
    }

    fn node_b(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].1
    }
}

/// Reads the weight stored alongside each [`TestGraph`] edge.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StoredWeight;

impl EdgeCost<TestGraph> for StoredWeight {
    fn cost(&self, graph: &TestGraph, _origin: NodeId, edge: EdgeId) -> f64 {
        graph.edges[edge].2
    }
}

/// Observer that keeps every notification for later assertions.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) rebuilds: Vec<RebuildReport>,
    pub(crate) completed: Vec<RunStats>,
}

impl CutObserver for RecordingObserver {
    fn on_rebuild(&mut self, report: &RebuildReport) {
        self.rebuilds.push(*report);
    }

    fn on_complete(&mut self, stats: &RunStats) {
        self.completed.push(stats.clone());
    }
}
