//! Invariant checks over completed cut runs.
//!
//! Every property drives its own [`CutRun`] so it can inspect the forest
//! after termination, not only the public [`CutResult`](crate::CutResult).

use proptest::{
    prop_assert, prop_assert_eq,
    test_runner::{TestCaseError, TestCaseResult},
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    Graph, NoopObserver, RandomCut, RandomCutBuilder, RebuildPolicy, Side,
    test_utils::{StoredWeight, TestGraph},
};

use super::super::CutRun;
use super::types::CutFixture;

const TOLERANCE: f64 = 1e-9;

fn completed_run(fixture: &CutFixture) -> Result<CutRun<'_, TestGraph>, TestCaseError> {
    let mut run = CutRun::new(
        &fixture.graph,
        &StoredWeight,
        fixture.source,
        fixture.sink,
        RebuildPolicy::default(),
    )
    .map_err(|err| TestCaseError::fail(format!("{err} ({})", describe(fixture))))?;
    run.run(&mut SmallRng::seed_from_u64(fixture.seed), &mut NoopObserver);
    Ok(run)
}

fn describe(fixture: &CutFixture) -> String {
    format!(
        "distribution={:?}, seed={}, nodes={}, edges={}, source={}, sink={}",
        fixture.distribution,
        fixture.seed,
        fixture.graph.node_count(),
        fixture.graph.edge_count(),
        fixture.source,
        fixture.sink,
    )
}

fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() <= TOLERANCE * left.abs().max(right.abs()).max(1.0)
}

/// Every node reaches a root, and the terminals are still their own roots.
pub(super) fn run_structural_property(fixture: &CutFixture) -> TestCaseResult {
    let mut run = completed_run(fixture)?;
    let node_count = fixture.graph.node_count();
    let forest = run.forest_mut();
    for node in 0..node_count {
        if forest.depth(node).is_none() {
            return Err(TestCaseError::fail(format!(
                "parent chain from node {node} never reaches a root ({})",
                describe(fixture)
            )));
        }
    }
    if forest.find(fixture.source) != fixture.source || forest.find(fixture.sink) != fixture.sink
    {
        return Err(TestCaseError::fail(format!(
            "terminal lost its root identity ({})",
            describe(fixture)
        )));
    }

    let roots: Vec<_> = (0..node_count).map(|node| forest.find(node)).collect();
    let mut sides = Vec::new();
    run.classify_nodes(&mut sides);
    let mut again = Vec::new();
    run.classify_nodes(&mut again);
    prop_assert_eq!(&sides, &again, "classification must be idempotent");

    for (node, (side, root)) in sides.iter().zip(&roots).enumerate() {
        let expected = if *root == fixture.source {
            Side::Source
        } else if *root == fixture.sink {
            Side::Sink
        } else {
            Side::Disconnected
        };
        prop_assert_eq!(*side, expected, "node {} classified from a stale root", node);
    }
    Ok(())
}

/// Contracted, discarded, cut and residual weight add up to the total.
pub(super) fn run_conservation_property(fixture: &CutFixture) -> TestCaseResult {
    let run = completed_run(fixture)?;
    let stats = run.stats();
    let total: f64 = fixture.graph.edges().iter().map(|edge| edge.2).sum();
    let accounted = stats.contracted_weight()
        + stats.discarded_weight()
        + stats.cut_weight()
        + stats.residual_weight();

    if !approx_eq(stats.total_weight(), total) || !approx_eq(accounted, total) {
        return Err(TestCaseError::fail(format!(
            "weight not conserved: total={total}, recorded={}, accounted={accounted} ({})",
            stats.total_weight(),
            describe(fixture)
        )));
    }
    prop_assert!(stats.residual_weight() <= TOLERANCE);
    Ok(())
}

/// No positive-weight edge is left between two distinct classes unless those
/// are the terminal classes, and the terminal-spanning edges sum to the cut.
pub(super) fn run_partition_property(fixture: &CutFixture) -> TestCaseResult {
    let mut run = completed_run(fixture)?;
    let cut_cost = run.cut_cost();
    let forest = run.forest_mut();
    let mut crossing = 0.0;
    for (edge, &(a, b, weight)) in fixture.graph.edges().iter().enumerate() {
        let root_a = forest.find(a);
        let root_b = forest.find(b);
        if root_a == root_b {
            continue;
        }
        let spans_terminals = (root_a == fixture.source && root_b == fixture.sink)
            || (root_a == fixture.sink && root_b == fixture.source);
        if spans_terminals {
            crossing += weight;
        } else if weight > 0.0 {
            return Err(TestCaseError::fail(format!(
                "edge {edge} ({a}, {b}, w={weight}) still joins classes {root_a} and {root_b} ({})",
                describe(fixture)
            )));
        }
    }

    if !approx_eq(crossing, cut_cost) {
        return Err(TestCaseError::fail(format!(
            "crossing weight {crossing} differs from cut cost {cut_cost} ({})",
            describe(fixture)
        )));
    }
    Ok(())
}

/// Identical seeds reproduce the classification, cost and statistics.
pub(super) fn run_determinism_property(fixture: &CutFixture) -> TestCaseResult {
    let cut = |cutter: &mut RandomCut<NoopObserver>| {
        cutter
            .cut(
                &fixture.graph,
                &StoredWeight,
                fixture.source,
                fixture.sink,
                &mut SmallRng::seed_from_u64(fixture.seed),
            )
            .map_err(|err| TestCaseError::fail(format!("{err} ({})", describe(fixture))))
    };
    let mut cutter = RandomCutBuilder::new()
        .with_observer(NoopObserver)
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    let first = cut(&mut cutter)?;
    let second = cut(&mut cutter)?;
    prop_assert_eq!(first, second);
    Ok(())
}
