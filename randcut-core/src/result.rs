//! Output types for cut computations.

use crate::{cut::RunStats, graph::NodeId};

/// Side of the partition a node ended up on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Side {
    /// The node was merged into the source terminal's class.
    Source,
    /// The node was merged into the sink terminal's class.
    Sink,
    /// The node's class never merged with either terminal.
    Disconnected,
}

impl Side {
    /// Returns a stable lowercase label.
    ///
    /// # Examples
    /// ```
    /// use randcut_core::Side;
    ///
    /// assert_eq!(Side::Disconnected.as_str(), "disconnected");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Sink => "sink",
            Self::Disconnected => "disconnected",
        }
    }
}

/// Represents the output of one [`RandomCut::cut`](crate::RandomCut::cut)
/// invocation.
///
/// # Examples
/// ```
/// use randcut_core::{EdgeId, Graph, NodeId, RandomCut, Side, UnitCost};
/// use rand::{SeedableRng, rngs::SmallRng};
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
/// let mut rng = SmallRng::seed_from_u64(7);
/// let result = RandomCut::new().cut(&Pair, &UnitCost, 0, 1, &mut rng)?;
/// assert_eq!(result.sides(), &[Side::Source, Side::Sink]);
/// assert_eq!(result.cost(), 1.0);
/// assert_eq!(result.count(Side::Disconnected), 0);
/// # Ok::<(), randcut_core::CutError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CutResult {
    sides: Vec<Side>,
    cost: f64,
    stats: RunStats,
}

impl CutResult {
    pub(crate) fn new(sides: Vec<Side>, cost: f64, stats: RunStats) -> Self {
        Self { sides, cost, stats }
    }

    /// Returns the side of every node, indexed by node id.
    #[must_use]
    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Returns the side of `node`, or `None` when it is out of range.
    #[must_use]
    pub fn side(&self, node: NodeId) -> Option<Side> {
        self.sides.get(node).copied()
    }

    /// Counts the nodes assigned to `side`.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.sides.iter().filter(|candidate| **candidate == side).count()
    }

    /// Returns the summed cost of edges left spanning source and sink.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the run statistics.
    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Consumes the result, returning the per-node sides.
    #[must_use]
    pub fn into_sides(self) -> Vec<Side> {
        self.sides
    }
}
