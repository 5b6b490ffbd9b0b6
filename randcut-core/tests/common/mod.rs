#![allow(dead_code)]

use randcut_core::{EdgeCost, EdgeId, Graph, NodeId};

/// Weighted edge list shared by the integration suites.
#[derive(Clone, Debug)]
pub struct WeightedEdges {
    node_count: usize,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl WeightedEdges {
    #[must_use]
    pub fn new(node_count: usize, edges: Vec<(NodeId, NodeId, f64)>) -> Self {
        Self { node_count, edges }
    }

    /// Two rails of `length` nodes joined by rungs. Rail edges weigh
    /// `rail_weight`, rungs weigh `1.0`.
    #[must_use]
    pub fn ladder(length: usize, rail_weight: f64) -> Self {
        let mut edges = Vec::new();
        for step in 0..length {
            let top = step;
            let bottom = step + length;
            edges.push((top, bottom, 1.0));
            if step + 1 < length {
                edges.push((top, top + 1, rail_weight));
                edges.push((bottom, bottom + 1, rail_weight));
            }
        }
        Self::new(length * 2, edges)
    }

    #[must_use]
    pub fn weight(&self, edge: EdgeId) -> f64 {
        self.edges[edge].2
    }
}

impl Graph for WeightedEdges {
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

/// Cost evaluator returning the stored edge weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stored;

impl EdgeCost<WeightedEdges> for Stored {
    fn cost(&self, graph: &WeightedEdges, _origin: NodeId, edge: EdgeId) -> f64 {
        graph.weight(edge)
    }
}
