//! Randomized source/sink cut driver.
//!
//! [`RandomCut`] contracts randomly drawn edges, weighted by cost, until no
//! edge can be contracted without merging the two terminals. Each invocation
//! owns a private forest, sampler and statistics triple, so independent runs
//! never share mutable state.

mod forest;
mod run;
mod sampler;
mod stats;

#[cfg(test)]
mod property;

use rand::Rng;
use tracing::instrument;

use crate::{
    Result,
    builder::{RandomCutBuilder, RebuildPolicy},
    graph::{EdgeCost, Graph, NodeId},
    observer::{CutObserver, TracingObserver},
    result::{CutResult, Side},
};

use self::run::CutRun;
pub use self::stats::{RebuildReport, RebuildTrigger, RunStats};

/// Entry point for computing randomized source/sink cuts.
///
/// # Examples
/// ```
/// use randcut_core::{EdgeId, Graph, NodeId, RandomCut, Side};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// struct Cycle;
///
/// impl Graph for Cycle {
///     fn node_count(&self) -> usize { 4 }
///     fn edge_count(&self) -> usize { 4 }
///     fn node_a(&self, edge: EdgeId) -> NodeId { edge }
///     fn node_b(&self, edge: EdgeId) -> NodeId { (edge + 1) % 4 }
/// }
///
/// let unit = |_: &Cycle, _: NodeId, _: EdgeId| 1.0;
/// let mut cutter = RandomCut::new();
/// let result = cutter.cut(&Cycle, &unit, 0, 2, &mut SmallRng::seed_from_u64(3))?;
/// assert_eq!(result.cost(), 2.0);
/// assert_eq!(result.side(0), Some(Side::Source));
/// assert_eq!(result.side(2), Some(Side::Sink));
/// assert_eq!(cutter.cut_cost(), 2.0);
/// # Ok::<(), randcut_core::CutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RandomCut<O = TracingObserver> {
    policy: RebuildPolicy,
    observer: O,
    last_cost: f64,
    last_stats: Option<RunStats>,
}

impl Default for RandomCut {
    fn default() -> Self {
        Self::with_parts(RebuildPolicy::default(), TracingObserver)
    }
}

impl RandomCut {
    /// Creates a cutter with the default rebuild policy and a
    /// [`TracingObserver`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for customising the rebuild policy and observer.
    #[must_use]
    pub fn builder() -> RandomCutBuilder {
        RandomCutBuilder::new()
    }
}

impl<O: CutObserver> RandomCut<O> {
    pub(crate) fn with_parts(policy: RebuildPolicy, observer: O) -> Self {
        Self {
            policy,
            observer,
            last_cost: 0.0,
            last_stats: None,
        }
    }

    /// Returns the rebuild policy in use.
    #[must_use]
    #[rustfmt::skip]
    pub fn policy(&self) -> RebuildPolicy { self.policy }

    /// Returns the diagnostics observer.
    #[must_use]
    #[rustfmt::skip]
    pub fn observer(&self) -> &O { &self.observer }

    /// Returns the diagnostics observer mutably.
    #[must_use]
    #[rustfmt::skip]
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    /// Consumes the cutter, returning its observer.
    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Returns the cut cost of the most recently completed run, or `0.0` when
    /// no run has completed yet.
    #[must_use]
    #[rustfmt::skip]
    pub fn cut_cost(&self) -> f64 { self.last_cost }

    /// Returns the statistics of the most recently completed run.
    #[must_use]
    pub fn last_stats(&self) -> Option<&RunStats> {
        self.last_stats.as_ref()
    }

    /// Computes a cut separating `source` from `sink`.
    ///
    /// # Errors
    /// Returns [`CutError::InvalidTerminal`](crate::CutError::InvalidTerminal)
    /// when a terminal lies outside the node range,
    /// [`CutError::SourceEqualsSink`](crate::CutError::SourceEqualsSink) when
    /// both terminals coincide,
    /// [`CutError::InvalidEdgeEndpoint`](crate::CutError::InvalidEdgeEndpoint)
    /// when an edge references a missing node,
    /// [`CutError::InvalidEdgeCost`](crate::CutError::InvalidEdgeCost) when
    /// `cost` yields a negative or non-finite weight, and
    /// [`CutError::TotalWeightOverflow`](crate::CutError::TotalWeightOverflow)
    /// when the weights sum past `f64::MAX`. No state is touched before
    /// validation succeeds.
    pub fn cut<G, C, R>(
        &mut self,
        graph: &G,
        cost: &C,
        source: NodeId,
        sink: NodeId,
        rng: &mut R,
    ) -> Result<CutResult>
    where
        G: Graph + ?Sized,
        C: EdgeCost<G> + ?Sized,
        R: Rng + ?Sized,
    {
        let mut sides = Vec::new();
        let cost = self.cut_into(graph, cost, source, sink, rng, &mut sides)?;
        let stats = self.last_stats.clone().unwrap_or_default();
        Ok(CutResult::new(sides, cost, stats))
    }

    /// Computes a cut, writing the side of every node into `sides`.
    ///
    /// `sides` is cleared and resized to the node count. The returned value
    /// is the cut cost, which stays available through [`Self::cut_cost`].
    ///
    /// # Errors
    /// Fails under the same conditions as [`Self::cut`]; `sides` is left
    /// untouched on error.
    ///
    /// # Examples
    /// ```
    /// use randcut_core::{EdgeId, Graph, NodeId, NoopObserver, RandomCut, Side, UnitCost};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// struct Isolated;
    ///
    /// impl Graph for Isolated {
    ///     fn node_count(&self) -> usize { 3 }
    ///     fn edge_count(&self) -> usize { 0 }
    ///     fn node_a(&self, _: EdgeId) -> NodeId { unreachable!() }
    ///     fn node_b(&self, _: EdgeId) -> NodeId { unreachable!() }
    /// }
    ///
    /// let mut cutter = RandomCut::builder().with_observer(NoopObserver).build()?;
    /// let mut sides = Vec::new();
    /// let cost = cutter.cut_into(
    ///     &Isolated,
    ///     &UnitCost,
    ///     0,
    ///     1,
    ///     &mut SmallRng::seed_from_u64(0),
    ///     &mut sides,
    /// )?;
    /// assert_eq!(cost, 0.0);
    /// assert_eq!(sides, [Side::Source, Side::Sink, Side::Disconnected]);
    /// # Ok::<(), randcut_core::CutError>(())
    /// ```
    #[instrument(
        name = "core.cut",
        err,
        skip(self, graph, cost, rng, sides),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
        ),
    )]
    pub fn cut_into<G, C, R>(
        &mut self,
        graph: &G,
        cost: &C,
        source: NodeId,
        sink: NodeId,
        rng: &mut R,
        sides: &mut Vec<Side>,
    ) -> Result<f64>
    where
        G: Graph + ?Sized,
        C: EdgeCost<G> + ?Sized,
        R: Rng + ?Sized,
    {
        let mut run = CutRun::new(graph, cost, source, sink, self.policy)?;
        run.run(rng, &mut self.observer);
        run.classify_nodes(sides);

        let cut_cost = run.cut_cost();
        self.last_cost = cut_cost;
        self.last_stats = Some(run.into_stats());
        Ok(cut_cost)
    }
}
