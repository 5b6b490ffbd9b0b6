//! Read-only graph contract consumed by the cut engine.

/// Identifier of a graph vertex, dense in `0..node_count`.
pub type NodeId = usize;

/// Identifier of a directed edge, dense in `0..edge_count`.
pub type EdgeId = usize;

/// Read-only view over a weighted directed graph.
///
/// Each edge carries two membership endpoints ([`node_a`](Graph::node_a),
/// [`node_b`](Graph::node_b)) used for equivalence-class checks, and two
/// directional endpoints ([`from`](Graph::from), [`to`](Graph::to)) used only
/// when evaluating costs. Most graphs store a single pair, so the directional
/// accessors default to the membership ones.
///
/// # Examples
/// ```
/// use randcut_core::{EdgeId, Graph, NodeId};
///
/// struct Path(Vec<(NodeId, NodeId)>);
///
/// impl Graph for Path {
///     fn node_count(&self) -> usize { self.0.len() + 1 }
///     fn edge_count(&self) -> usize { self.0.len() }
///     fn node_a(&self, edge: EdgeId) -> NodeId { self.0[edge].0 }
///     fn node_b(&self, edge: EdgeId) -> NodeId { self.0[edge].1 }
/// }
///
/// let path = Path(vec![(0, 1), (1, 2)]);
/// assert_eq!(path.node_count(), 3);
/// assert_eq!(path.from(1), 1);
/// assert_eq!(path.to(1), 2);
/// ```
pub trait Graph {
    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    /// Returns the first membership endpoint of `edge`.
    fn node_a(&self, edge: EdgeId) -> NodeId;

    /// Returns the second membership endpoint of `edge`.
    fn node_b(&self, edge: EdgeId) -> NodeId;

    /// Returns the node `edge` leaves from.
    fn from(&self, edge: EdgeId) -> NodeId {
        self.node_a(edge)
    }

    /// Returns the node `edge` arrives at.
    fn to(&self, edge: EdgeId) -> NodeId {
        self.node_b(edge)
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn node_a(&self, edge: EdgeId) -> NodeId {
        (**self).node_a(edge)
    }

    fn node_b(&self, edge: EdgeId) -> NodeId {
        (**self).node_b(edge)
    }

    fn from(&self, edge: EdgeId) -> NodeId {
        (**self).from(edge)
    }

    fn to(&self, edge: EdgeId) -> NodeId {
        (**self).to(edge)
    }
}

/// Caller-supplied weight of an edge.
///
/// The engine evaluates each edge once per cut, passing the edge's
/// [`from`](Graph::from) node as `origin`. Implementations must be pure and
/// return finite, non-negative values; anything else is rejected with
/// [`CutError::InvalidEdgeCost`](crate::CutError::InvalidEdgeCost).
///
/// Closures of the shape `Fn(&G, NodeId, EdgeId) -> f64` implement the trait.
///
/// # Examples
/// ```
/// use randcut_core::{EdgeCost, EdgeId, Graph, NodeId};
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
/// let unit = |_: &Pair, _: NodeId, _: EdgeId| 1.0;
/// assert_eq!(unit.cost(&Pair, 0, 0), 1.0);
/// ```
pub trait EdgeCost<G: ?Sized> {
    /// Returns the weight of `edge` when traversed from `origin`.
    fn cost(&self, graph: &G, origin: NodeId, edge: EdgeId) -> f64;
}

impl<G: ?Sized, F> EdgeCost<G> for F
where
    F: Fn(&G, NodeId, EdgeId) -> f64,
{
    fn cost(&self, graph: &G, origin: NodeId, edge: EdgeId) -> f64 {
        self(graph, origin, edge)
    }
}

/// Cost evaluator that weighs every edge equally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitCost;

impl<G: ?Sized> EdgeCost<G> for UnitCost {
    fn cost(&self, _graph: &G, _origin: NodeId, _edge: EdgeId) -> f64 {
        1.0
    }
}
