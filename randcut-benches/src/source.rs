//! Synthetic graphs for benchmarking.
//!
//! Provides [`SyntheticGraph`], a [`Graph`] with pre-generated random edge
//! weights. Generation is seeded so every benchmark run sees the same input.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use randcut_core::{EdgeCost, EdgeId, Graph, NodeId};

const MIN_WEIGHT: f64 = 1.0;
const MAX_WEIGHT: f64 = 10.0;

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The graph would hold fewer than two nodes, leaving no distinct
    /// terminals.
    #[error("graph needs at least two nodes, got {nodes}")]
    TooFewNodes {
        /// Requested node count.
        nodes: usize,
    },
    /// The random graph was asked for zero edges per node.
    #[error("degree must be greater than zero")]
    ZeroDegree,
}

/// Graph family to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphShape {
    /// 4-connected lattice; each adjacent pair is linked in both directions.
    Grid {
        /// Cells per row.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// Random spanning tree plus extra random edges, `degree` per node in
    /// total.
    Random {
        /// Number of nodes.
        node_count: usize,
        /// Edges generated per node.
        degree: usize,
    },
}

impl GraphShape {
    /// Short label used in benchmark ids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::Random { .. } => "random",
        }
    }
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Graph family and size.
    pub shape: GraphShape,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A seeded random graph for benchmarking.
///
/// Every edge carries a weight drawn uniformly from `[1, 10)`. The graph is
/// connected, so a cut between [`terminals`](Self::terminals) always has to
/// pay for at least one edge.
///
/// # Examples
///
/// ```
/// use randcut_benches::source::{GraphShape, SyntheticConfig, SyntheticGraph};
/// use randcut_core::Graph;
///
/// let config = SyntheticConfig {
///     shape: GraphShape::Grid { width: 3, height: 2 },
///     seed: 42,
/// };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.edge_count(), 14);
/// assert_eq!(graph.terminals(), (0, 5));
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    node_count: usize,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl SyntheticGraph {
    /// Generates a graph eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewNodes`] if the shape yields fewer than
    /// two nodes, or [`SyntheticError::ZeroDegree`] for a random graph with
    /// zero degree.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        match config.shape {
            GraphShape::Grid { width, height } => {
                let node_count = width.saturating_mul(height);
                if node_count < 2 {
                    return Err(SyntheticError::TooFewNodes { nodes: node_count });
                }
                Ok(Self::grid(width, height, &mut rng))
            }
            GraphShape::Random { node_count, degree } => {
                if node_count < 2 {
                    return Err(SyntheticError::TooFewNodes { nodes: node_count });
                }
                if degree == 0 {
                    return Err(SyntheticError::ZeroDegree);
                }
                Ok(Self::random(node_count, degree, &mut rng))
            }
        }
    }

    fn grid(width: usize, height: usize, rng: &mut SmallRng) -> Self {
        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let node = x + y * width;
                if x + 1 < width {
                    link(&mut edges, node, node + 1, rng);
                }
                if y + 1 < height {
                    link(&mut edges, node, node + width, rng);
                }
            }
        }
        Self {
            node_count: width * height,
            edges,
        }
    }

    fn random(node_count: usize, degree: usize, rng: &mut SmallRng) -> Self {
        let total = node_count.saturating_mul(degree);
        let mut edges = Vec::with_capacity(total);
        for node in 1..node_count {
            let parent = rng.gen_range(0..node);
            edges.push((parent, node, rng.gen_range(MIN_WEIGHT..MAX_WEIGHT)));
        }
        while edges.len() < total {
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            if a != b {
                edges.push((a, b, rng.gen_range(MIN_WEIGHT..MAX_WEIGHT)));
            }
        }
        Self { node_count, edges }
    }

    /// Returns the first and last node, used as source and sink.
    #[must_use]
    pub const fn terminals(&self) -> (NodeId, NodeId) {
        (0, self.node_count - 1)
    }

    /// Returns the generated weight of `edge`.
    ///
    /// # Panics
    ///
    /// Panics when `edge` is out of range.
    #[must_use]
    pub fn weight(&self, edge: EdgeId) -> f64 {
        self.edges[edge].2
    }
}

fn link(edges: &mut Vec<(NodeId, NodeId, f64)>, a: NodeId, b: NodeId, rng: &mut SmallRng) {
    let weight = rng.gen_range(MIN_WEIGHT..MAX_WEIGHT);
    edges.push((a, b, weight));
    edges.push((b, a, weight));
}

impl Graph for SyntheticGraph {
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

/// Cost evaluator returning the generated weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticWeight;

impl EdgeCost<SyntheticGraph> for SyntheticWeight {
    fn cost(&self, graph: &SyntheticGraph, _origin: NodeId, edge: EdgeId) -> f64 {
        graph.weight(edge)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(GraphShape::Grid { width: 1, height: 1 }, SyntheticError::TooFewNodes { nodes: 1 })]
    #[case(GraphShape::Grid { width: 0, height: 9 }, SyntheticError::TooFewNodes { nodes: 0 })]
    #[case(GraphShape::Random { node_count: 1, degree: 3 }, SyntheticError::TooFewNodes { nodes: 1 })]
    #[case(GraphShape::Random { node_count: 8, degree: 0 }, SyntheticError::ZeroDegree)]
    fn rejects_degenerate_shapes(#[case] shape: GraphShape, #[case] expected: SyntheticError) {
        let result = SyntheticGraph::generate(&SyntheticConfig { shape, seed: 1 });
        assert_eq!(result.err(), Some(expected));
    }

    #[rstest]
    fn random_graphs_are_seeded_and_sized() -> Result<(), SyntheticError> {
        let config = SyntheticConfig {
            shape: GraphShape::Random {
                node_count: 64,
                degree: 3,
            },
            seed: 9,
        };
        let first = SyntheticGraph::generate(&config)?;
        let second = SyntheticGraph::generate(&config)?;
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.edge_count(), 192);
        assert_eq!(first.terminals(), (0, 63));
        for edge in 0..first.edge_count() {
            assert_ne!(first.node_a(edge), first.node_b(edge));
            let weight = SyntheticWeight.cost(&first, first.from(edge), edge);
            assert!((MIN_WEIGHT..MAX_WEIGHT).contains(&weight));
        }
        Ok(())
    }

    #[rstest]
    fn grid_pairs_share_their_weight() -> Result<(), SyntheticError> {
        let graph = SyntheticGraph::generate(&SyntheticConfig {
            shape: GraphShape::Grid {
                width: 4,
                height: 4,
            },
            seed: 3,
        })?;
        assert_eq!(graph.edge_count(), 48);
        for pair in graph.edges.chunks(2) {
            assert_eq!(pair[0].0, pair[1].1);
            assert_eq!(pair[0].2, pair[1].2);
        }
        Ok(())
    }
}
