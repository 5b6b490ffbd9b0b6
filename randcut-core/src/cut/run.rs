//! State and main loop of a single cut.
//!
//! A [`CutRun`] owns the forest, the sampler and the statistics for exactly
//! one `cut` call. The loop draws an edge, re-validates it against the forest,
//! and either contracts it or counts the draw as rejected. Terminal-crossing
//! edges are left in the sampler and charged to the cut cost when the next
//! rebuild purges them. The run terminates when the sampler can no longer
//! yield an edge.

use rand::Rng;

use crate::{
    Result,
    builder::RebuildPolicy,
    error::{CutError, TerminalRole},
    graph::{EdgeCost, EdgeId, Graph, NodeId},
    observer::CutObserver,
    result::Side,
};

use super::{
    forest::DisjointSetForest,
    sampler::{EdgeSampler, EdgeState},
    stats::{RebuildReport, RebuildTrigger, RunStats},
};

pub(crate) struct CutRun<'g, G: ?Sized> {
    graph: &'g G,
    forest: DisjointSetForest,
    sampler: EdgeSampler,
    weights: Vec<f64>,
    contracted: Vec<bool>,
    source: NodeId,
    sink: NodeId,
    policy: RebuildPolicy,
    stats: RunStats,
    calls_since_rebuild: u64,
    rejected_since_rebuild: u64,
}

impl<'g, G: Graph + ?Sized> CutRun<'g, G> {
    /// Validates the inputs and prepares the initial sampler.
    ///
    /// Nothing is allocated for the forest until every precondition holds.
    pub(crate) fn new<C: EdgeCost<G> + ?Sized>(
        graph: &'g G,
        cost: &C,
        source: NodeId,
        sink: NodeId,
        policy: RebuildPolicy,
    ) -> Result<Self> {
        let node_count = graph.node_count();
        validate_terminal(TerminalRole::Source, source, node_count)?;
        validate_terminal(TerminalRole::Sink, sink, node_count)?;
        if source == sink {
            return Err(CutError::SourceEqualsSink { node: source });
        }

        let (weights, total_weight) = evaluate_weights(graph, cost)?;
        let sampler = EdgeSampler::build(weights.iter().copied().enumerate());

        Ok(Self {
            graph,
            forest: DisjointSetForest::new(node_count),
            sampler,
            contracted: vec![false; weights.len()],
            stats: RunStats {
                edge_count: weights.len(),
                total_weight,
                ..RunStats::default()
            },
            weights,
            source,
            sink,
            policy,
            calls_since_rebuild: 0,
            rejected_since_rebuild: 0,
        })
    }

    /// Runs the contraction loop until the sampler is exhausted.
    pub(crate) fn run<R, O>(&mut self, rng: &mut R, observer: &mut O)
    where
        R: Rng + ?Sized,
        O: CutObserver + ?Sized,
    {
        while let Some(edge) = self.next_edge(rng, observer) {
            self.contract(edge);
        }
        self.settle();
        observer.on_complete(&self.stats);
    }

    /// Writes the side of every node into `sides`, replacing its contents.
    pub(crate) fn classify_nodes(&mut self, sides: &mut Vec<Side>) {
        let source_root = self.forest.find(self.source);
        let sink_root = self.forest.find(self.sink);
        sides.clear();
        sides.reserve(self.forest.len());
        for node in 0..self.forest.len() {
            let root = self.forest.find(node);
            sides.push(if root == source_root {
                Side::Source
            } else if root == sink_root {
                Side::Sink
            } else {
                Side::Disconnected
            });
        }
    }

    pub(crate) fn cut_cost(&self) -> f64 {
        self.stats.cut_weight
    }

    pub(crate) fn into_stats(self) -> RunStats {
        self.stats
    }

    /// Requests one contractible edge, rebuilding the sampler as the policy
    /// dictates. Returns `None` once no edge can be supplied.
    fn next_edge<R, O>(&mut self, rng: &mut R, observer: &mut O) -> Option<EdgeId>
    where
        R: Rng + ?Sized,
        O: CutObserver + ?Sized,
    {
        self.stats.calls += 1;
        self.calls_since_rebuild += 1;
        let mut attempt_rejections = 0_usize;
        loop {
            let edge = self.sampler.sample(rng)?;
            if self.edge_state(edge) == EdgeState::Live {
                return Some(edge);
            }

            self.stats.rejected_draws += 1;
            self.rejected_since_rebuild += 1;
            attempt_rejections += 1;
            let Some(trigger) = self.policy.trigger(
                self.calls_since_rebuild,
                self.rejected_since_rebuild,
                attempt_rejections,
                self.sampler.len(),
            ) else {
                continue;
            };

            self.rebuild(trigger, observer);
            attempt_rejections = 0;
            if self.sampler.is_empty() {
                return None;
            }
        }
    }

    fn edge_state(&mut self, edge: EdgeId) -> EdgeState {
        classify_edge(
            self.graph,
            &mut self.forest,
            &self.contracted,
            (self.source, self.sink),
            edge,
        )
    }

    fn rebuild<O: CutObserver + ?Sized>(&mut self, trigger: RebuildTrigger, observer: &mut O) {
        let entries_before = self.sampler.len();
        let weight_before = self.sampler.total();
        self.purge();
        self.stats.rebuilds += 1;
        self.calls_since_rebuild = 1;
        self.rejected_since_rebuild = 0;

        observer.on_rebuild(&RebuildReport {
            trigger,
            entries_before,
            entries_after: self.sampler.len(),
            weight_before,
            weight_after: self.sampler.total(),
            cut_weight: self.stats.cut_weight,
        });
    }

    /// Drops every non-live sampler entry, charging crossing edges to the cut
    /// and self-loops to the discarded total.
    fn purge(&mut self) {
        let Self {
            graph,
            forest,
            sampler,
            weights,
            contracted,
            source,
            sink,
            stats,
            ..
        } = self;
        let terminals = (*source, *sink);
        let reclaimed = sampler.rebuild(
            |edge| weights[edge],
            |edge| classify_edge(*graph, forest, contracted, terminals, edge),
        );
        stats.cut_weight += reclaimed.crossing;
        stats.discarded_weight += reclaimed.collapsed;
    }

    /// Contracts `edge`, letting a terminal root absorb the other class.
    fn contract(&mut self, edge: EdgeId) {
        let root_a = self.forest.find(self.graph.node_a(edge));
        let root_b = self.forest.find(self.graph.node_b(edge));
        debug_assert!(
            !self.is_terminal_pair(root_a, root_b),
            "edge {edge} would merge the terminals"
        );

        let (parent, child) = if self.is_terminal(root_b) && !self.is_terminal(root_a) {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        self.forest.union(parent, child);

        self.contracted[edge] = true;
        self.stats.contractions += 1;
        self.stats.contracted_weight += self.weights[edge];
    }

    /// Accounts for whatever the sampler still holds once it reports empty.
    ///
    /// Only zero-weight entries can remain, so this never changes the cut
    /// cost by more than rounding; it keeps the weight ledger balanced.
    fn settle(&mut self) {
        if self.sampler.is_empty() {
            return;
        }
        self.purge();
        self.stats.residual_weight = self.sampler.total();
    }

    fn is_terminal(&self, root: NodeId) -> bool {
        root == self.source || root == self.sink
    }

    fn is_terminal_pair(&self, left: NodeId, right: NodeId) -> bool {
        (left == self.source && right == self.sink) || (left == self.sink && right == self.source)
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> &RunStats {
        &self.stats
    }

    #[cfg(test)]
    pub(crate) fn forest_mut(&mut self) -> &mut DisjointSetForest {
        &mut self.forest
    }

    #[cfg(test)]
    pub(crate) fn sampler(&self) -> &EdgeSampler {
        &self.sampler
    }
}

fn validate_terminal(role: TerminalRole, node: NodeId, node_count: usize) -> Result<()> {
    if node < node_count {
        Ok(())
    } else {
        Err(CutError::InvalidTerminal {
            role,
            node,
            node_count,
        })
    }
}

fn evaluate_weights<G, C>(graph: &G, cost: &C) -> Result<(Vec<f64>, f64)>
where
    G: Graph + ?Sized,
    C: EdgeCost<G> + ?Sized,
{
    let node_count = graph.node_count();
    let mut weights = Vec::with_capacity(graph.edge_count());
    let mut total = 0.0_f64;
    for edge in 0..graph.edge_count() {
        for node in [graph.node_a(edge), graph.node_b(edge)] {
            if node >= node_count {
                return Err(CutError::InvalidEdgeEndpoint {
                    edge,
                    node,
                    node_count,
                });
            }
        }
        let weight = cost.cost(graph, graph.from(edge), edge);
        if !weight.is_finite() || weight < 0.0 {
            return Err(CutError::InvalidEdgeCost { edge, cost: weight });
        }
        // The sampler scales draws by the running total, so it must stay finite.
        total += weight;
        if !total.is_finite() {
            return Err(CutError::TotalWeightOverflow { edge });
        }
        weights.push(weight);
    }
    Ok((weights, total))
}

fn classify_edge<G: Graph + ?Sized>(
    graph: &G,
    forest: &mut DisjointSetForest,
    contracted: &[bool],
    (source, sink): (NodeId, NodeId),
    edge: EdgeId,
) -> EdgeState {
    if contracted[edge] {
        return EdgeState::Contracted;
    }
    let root_a = forest.find(graph.node_a(edge));
    let root_b = forest.find(graph.node_b(edge));
    if root_a == root_b {
        EdgeState::Collapsed
    } else if (root_a == source && root_b == sink) || (root_a == sink && root_b == source) {
        EdgeState::Crossing
    } else {
        EdgeState::Live
    }
}
