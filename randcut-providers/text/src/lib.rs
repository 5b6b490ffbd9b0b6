//! Read-only graph containers parsed from UTF-8 text.
//!
//! [`EdgeListGraph`] reads `from to [weight]` lines; [`GridGraph`] reads an
//! ASCII occupancy mask where every open cell is linked to its open
//! neighbours. Both implement [`randcut_core::Graph`] and expose their
//! weights through [`StoredWeight`].

mod edge_list;
mod errors;
mod grid;

use randcut_core::{EdgeCost, EdgeId, NodeId};

pub use crate::{
    edge_list::EdgeListGraph,
    errors::{EdgeListError, GridError},
    grid::GridGraph,
};

/// Cost evaluator returning the weight stored in the graph.
///
/// # Examples
/// ```
/// use randcut_core::EdgeCost;
/// use randcut_providers_text::{EdgeListGraph, StoredWeight};
///
/// let graph = EdgeListGraph::parse("demo", "0 1 2.5\n")?;
/// assert_eq!(StoredWeight.cost(&graph, 0, 0), 2.5);
/// # Ok::<(), randcut_providers_text::EdgeListError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoredWeight;

impl EdgeCost<EdgeListGraph> for StoredWeight {
    fn cost(&self, graph: &EdgeListGraph, _origin: NodeId, edge: EdgeId) -> f64 {
        graph.weight(edge)
    }
}

impl EdgeCost<GridGraph> for StoredWeight {
    fn cost(&self, _graph: &GridGraph, _origin: NodeId, _edge: EdgeId) -> f64 {
        GridGraph::EDGE_WEIGHT
    }
}
