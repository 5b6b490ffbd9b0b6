//! Sampler rebuild policy sweep.
//!
//! Cuts one random graph under a grid of rebuild thresholds to show how
//! eager and lazy compaction trade rebuild cost against rejected draws.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use randcut_benches::{
    error::BenchSetupError,
    params::PolicyBenchParams,
    source::{GraphShape, SyntheticConfig, SyntheticGraph, SyntheticWeight},
};
use randcut_core::{NoopObserver, RandomCut, RebuildPolicy};

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 42;

/// Draw-count floors to sweep.
const MIN_CALLS: &[u64] = &[0, 32, 128, 1_024];

/// Rejection ratios to sweep.
const RATIOS: &[f64] = &[0.25, 1.0, 4.0];

fn rebuild_policy_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("rebuild_policy");
    group.sample_size(20);

    let graph = SyntheticGraph::generate(&SyntheticConfig {
        shape: GraphShape::Random {
            node_count: 4_000,
            degree: 4,
        },
        seed: SEED,
    })?;
    let (source, sink) = graph.terminals();

    for &min_calls in MIN_CALLS {
        for &max_rejection_ratio in RATIOS {
            let policy = RebuildPolicy::new(min_calls, max_rejection_ratio)?;
            let mut cutter = RandomCut::builder()
                .with_observer(NoopObserver)
                .with_policy(policy)
                .build()?;
            let mut rng = SmallRng::seed_from_u64(SEED);
            let params = PolicyBenchParams {
                min_calls,
                max_rejection_ratio,
            };

            group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, input| {
                b.iter(|| cutter.cut(input, &SyntheticWeight, source, sink, &mut rng));
            });
        }
    }

    group.finish();
    Ok(())
}

fn rebuild_policy(c: &mut Criterion) {
    if let Err(err) = rebuild_policy_impl(c) {
        panic!("rebuild_policy benchmark setup failed: {err}");
    }
}

criterion_group!(benches, rebuild_policy);
criterion_main!(benches);
