//! Graph generators for cut property tests.
//!
//! Each generator returns a [`CutFixture`] whose terminals are distinct
//! nodes of the generated graph. Edges are drawn between unordered node
//! pairs; the driver treats both endpoints symmetrically, so no direction is
//! implied.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{graph::NodeId, test_utils::TestGraph};

use super::types::{CutFixture, WeightDistribution};

const MIN_NODES: usize = 4;
const MAX_NODES: usize = 48;
/// Dense graphs stay small to keep the edge count quadratic but bounded.
const DENSE_MAX_NODES: usize = 20;

type WeightedEdge = (NodeId, NodeId, f64);

/// Generates fixtures covering every weight distribution.
pub(super) fn cut_fixture_strategy() -> impl Strategy<Value = CutFixture> {
    (any::<WeightDistribution>(), any::<u64>()).prop_map(|(distribution, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(distribution, seed, &mut rng)
    })
}

/// Generates a fixture for a specific distribution.
pub(super) fn generate_fixture(
    distribution: WeightDistribution,
    seed: u64,
    rng: &mut SmallRng,
) -> CutFixture {
    let (node_count, edges) = match distribution {
        WeightDistribution::Unique => {
            probabilistic_graph(rng, MAX_NODES, (0.1, 0.35), |r| r.gen_range(0.1..100.0))
        }
        WeightDistribution::ManyIdentical => {
            let pool: Vec<f64> = (0..rng.gen_range(1..=3))
                .map(|_| f64::from(rng.gen_range(0_u8..=4)))
                .collect();
            probabilistic_graph(rng, MAX_NODES, (0.1, 0.35), |r| {
                pool[r.gen_range(0..pool.len())]
            })
        }
        WeightDistribution::Sparse => sparse_graph(rng),
        WeightDistribution::Dense => {
            probabilistic_graph(rng, DENSE_MAX_NODES, (0.7, 0.95), |r| r.gen_range(1.0..10.0))
        }
        WeightDistribution::Disconnected => disconnected_graph(rng),
    };

    let source = rng.gen_range(0..node_count);
    let sink = (source + rng.gen_range(1..node_count)) % node_count;
    CutFixture {
        graph: TestGraph::new(node_count, edges),
        source,
        sink,
        seed,
        distribution,
    }
}

fn probabilistic_graph(
    rng: &mut SmallRng,
    max_nodes: usize,
    edge_prob_range: (f64, f64),
    mut weight: impl FnMut(&mut SmallRng) -> f64,
) -> (usize, Vec<WeightedEdge>) {
    let node_count = rng.gen_range(MIN_NODES..=max_nodes);
    let edge_probability = rng.gen_range(edge_prob_range.0..=edge_prob_range.1);
    let mut edges = Vec::new();
    for a in 0..node_count {
        for b in (a + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                let w = weight(rng);
                edges.push((a, b, w));
            }
        }
    }
    (node_count, edges)
}

fn sparse_graph(rng: &mut SmallRng) -> (usize, Vec<WeightedEdge>) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut edges: Vec<WeightedEdge> = (1..node_count)
        .map(|node| (rng.gen_range(0..node), node, rng.gen_range(1.0..10.0)))
        .collect();
    for _ in 0..node_count / 2 {
        let a = rng.gen_range(0..node_count);
        let b = rng.gen_range(0..node_count);
        if a != b {
            edges.push((a, b, rng.gen_range(1.0..10.0)));
        }
    }
    (node_count, edges)
}

fn disconnected_graph(rng: &mut SmallRng) -> (usize, Vec<WeightedEdge>) {
    let components = rng.gen_range(2..=4);
    let mut node_count = 0;
    let mut edges = Vec::new();
    for _ in 0..components {
        let size = rng.gen_range(2..=12);
        let offset = node_count;
        for node in 1..size {
            let parent = rng.gen_range(0..node);
            edges.push((offset + parent, offset + node, rng.gen_range(0.5..5.0)));
        }
        node_count += size;
    }
    (node_count, edges)
}
