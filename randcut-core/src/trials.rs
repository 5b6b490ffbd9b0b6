//! Repeated randomized cuts.
//!
//! A single contraction run finds a minimum cut only with some probability,
//! so callers run many independently seeded trials and keep the cheapest.
//! Trial `i` derives its seed from the base seed and `i` alone, which makes
//! the summary identical whether trials run sequentially or on `rayon`.

use std::collections::BTreeMap;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::RebuildPolicy,
    cut::RandomCut,
    error::CutError,
    graph::{EdgeCost, Graph, NodeId},
    observer::NoopObserver,
    result::CutResult,
};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-trial seed
/// derivation.
const TRIAL_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

const DEFAULT_TRIALS: usize = 200;

/// Derives the seed of trial `trial_index` from `base_seed`.
///
/// # Examples
/// ```
/// use randcut_core::mix_seed;
///
/// assert_eq!(mix_seed(7, 3), mix_seed(7, 3));
/// assert_ne!(mix_seed(7, 3), mix_seed(7, 4));
/// ```
#[inline]
#[must_use]
pub fn mix_seed(base_seed: u64, trial_index: usize) -> u64 {
    splitmix64(base_seed ^ ((trial_index as u64 + 1).wrapping_mul(TRIAL_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(TRIAL_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Configures [`run_trials`].
///
/// # Examples
/// ```
/// use randcut_core::{RebuildPolicy, TrialConfig};
///
/// let config = TrialConfig::new(50, 9)?.with_policy(RebuildPolicy::default());
/// assert_eq!(config.trials(), 50);
/// assert_eq!(config.seed(), 9);
/// assert!(TrialConfig::new(0, 9).is_err());
/// # Ok::<(), randcut_core::CutError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialConfig {
    trials: usize,
    seed: u64,
    policy: RebuildPolicy,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: 0,
            policy: RebuildPolicy::default(),
        }
    }
}

impl TrialConfig {
    /// Creates a configuration running `trials` cuts from `seed`.
    ///
    /// # Errors
    /// Returns [`CutError::ZeroTrials`] when `trials` is zero.
    pub fn new(trials: usize, seed: u64) -> Result<Self> {
        if trials == 0 {
            return Err(CutError::ZeroTrials);
        }
        Ok(Self {
            trials,
            seed,
            ..Self::default()
        })
    }

    /// Overrides the rebuild policy used by every trial.
    #[must_use]
    pub fn with_policy(mut self, policy: RebuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of trials to run.
    #[must_use]
    #[rustfmt::skip]
    pub fn trials(&self) -> usize { self.trials }

    /// Base seed from which every trial seed is derived.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Rebuild policy shared by the trials.
    #[must_use]
    #[rustfmt::skip]
    pub fn policy(&self) -> RebuildPolicy { self.policy }
}

/// Outcome of [`run_trials`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrialSummary {
    best: CutResult,
    best_trial: usize,
    costs: Vec<f64>,
    rebuilds: u64,
}

impl TrialSummary {
    /// Largest histogram bucket; every integer up to it is exact in `f64`.
    pub const HISTOGRAM_CEILING: i64 = 1 << 53;

    fn from_results(mut results: Vec<CutResult>) -> Result<Self> {
        let costs: Vec<f64> = results.iter().map(CutResult::cost).collect();
        let rebuilds = results.iter().map(|result| result.stats().rebuilds()).sum();
        let best_trial = costs
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, &cost)| match best {
                Some((_, best_cost)) if best_cost <= cost => best,
                _ => Some((index, cost)),
            })
            .map(|(index, _)| index)
            .ok_or(CutError::ZeroTrials)?;
        let best = results.swap_remove(best_trial);
        Ok(Self {
            best,
            best_trial,
            costs,
            rebuilds,
        })
    }

    /// The cheapest cut found; ties go to the earliest trial.
    #[must_use]
    #[rustfmt::skip]
    pub fn best(&self) -> &CutResult { &self.best }

    /// Consumes the summary, returning the cheapest cut.
    #[must_use]
    pub fn into_best(self) -> CutResult {
        self.best
    }

    /// Index of the trial that produced [`Self::best`].
    #[must_use]
    #[rustfmt::skip]
    pub fn best_trial(&self) -> usize { self.best_trial }

    /// Cut cost of every trial, in trial order.
    #[must_use]
    #[rustfmt::skip]
    pub fn costs(&self) -> &[f64] { &self.costs }

    /// Number of trials that ran.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.costs.len()
    }

    /// Sampler rebuilds summed over every trial.
    #[must_use]
    #[rustfmt::skip]
    pub fn rebuilds(&self) -> u64 { self.rebuilds }

    /// Counts trials per floored cut cost.
    ///
    /// Costs at or above [`Self::HISTOGRAM_CEILING`] share that bucket.
    ///
    /// # Examples
    /// ```
    /// use randcut_core::{EdgeId, Graph, NodeId, TrialConfig, UnitCost, run_trials};
    ///
    /// struct Pair;
    ///
    /// impl Graph for Pair {
    ///     fn node_count(&self) -> usize { 2 }
    ///     fn edge_count(&self) -> usize { 1 }
    ///     fn node_a(&self, _: EdgeId) -> NodeId { 0 }
    ///     fn node_b(&self, _: EdgeId) -> NodeId { 1 }
    /// }
    ///
    /// let summary = run_trials(&Pair, &UnitCost, 0, 1, &TrialConfig::new(4, 1)?)?;
    /// assert_eq!(summary.histogram().get(&1), Some(&4));
    /// # Ok::<(), randcut_core::CutError>(())
    /// ```
    #[must_use]
    pub fn histogram(&self) -> BTreeMap<i64, usize> {
        let mut histogram = BTreeMap::new();
        for cost in &self.costs {
            let bucket = cost.floor().min(Self::HISTOGRAM_CEILING as f64) as i64;
            *histogram.entry(bucket).or_insert(0) += 1;
        }
        histogram
    }
}

/// Runs `config.trials()` independently seeded cuts and keeps the cheapest.
///
/// Every trial owns its own forest, sampler and statistics; only the graph
/// and the cost evaluator are shared, read-only.
///
/// # Errors
/// Returns the first validation error raised by [`RandomCut::cut`]; inputs
/// are identical across trials, so either every trial fails or none does.
#[instrument(
    name = "core.run_trials",
    err,
    skip(graph, cost, config),
    fields(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        trials = config.trials(),
        seed = config.seed(),
    ),
)]
pub fn run_trials<G, C>(
    graph: &G,
    cost: &C,
    source: NodeId,
    sink: NodeId,
    config: &TrialConfig,
) -> Result<TrialSummary>
where
    G: Graph + Sync + ?Sized,
    C: EdgeCost<G> + Sync + ?Sized,
{
    let policy = config.policy();
    let base_seed = config.seed();
    let trial = |index: usize| -> Result<CutResult> {
        let mut cutter = RandomCut::with_parts(policy, NoopObserver);
        let mut rng = SmallRng::seed_from_u64(mix_seed(base_seed, index));
        let result = cutter.cut(graph, cost, source, sink, &mut rng)?;
        debug!(
            trial = index,
            cost = result.cost(),
            rebuilds = result.stats().rebuilds(),
            "trial completed"
        );
        Ok(result)
    };

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        (0..config.trials())
            .into_par_iter()
            .map(trial)
            .collect::<Result<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let results = (0..config.trials())
        .map(trial)
        .collect::<Result<Vec<_>>>()?;

    let summary = TrialSummary::from_results(results)?;
    info!(
        best_cost = summary.best().cost(),
        best_trial = summary.best_trial(),
        rebuilds = summary.rebuilds(),
        "trials completed"
    );
    Ok(summary)
}
