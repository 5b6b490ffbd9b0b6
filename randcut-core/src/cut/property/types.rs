//! Type definitions for cut property tests.

use test_strategy::Arbitrary;

use crate::{graph::NodeId, test_utils::TestGraph};

/// Weight distribution and topology used to generate a fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WeightDistribution {
    /// Every edge draws a distinct weight from a continuous range.
    #[weight(2)]
    Unique,
    /// Edges share a small pool of integer weights, zero included.
    #[weight(3)]
    ManyIdentical,
    /// A random spanning tree plus a handful of extra edges.
    #[weight(2)]
    Sparse,
    /// Nearly complete graphs.
    #[weight(2)]
    Dense,
    /// Several components with no edges between them.
    #[weight(2)]
    Disconnected,
}

/// Generated graph with its terminals and enough context to diagnose a
/// failure.
#[derive(Clone, Debug)]
pub(super) struct CutFixture {
    pub graph: TestGraph,
    pub source: NodeId,
    pub sink: NodeId,
    pub seed: u64,
    pub distribution: WeightDistribution,
}
