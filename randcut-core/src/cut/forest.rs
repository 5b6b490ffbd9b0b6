//! Disjoint-set forest tracking which nodes have been contracted together.
//!
//! Classes are stored as a dense parent array indexed by node id. Unlike a
//! general-purpose union-find there is no union by rank: the caller decides
//! which root becomes the parent so that the two terminal roots keep their
//! identity for the whole run.

use crate::graph::NodeId;

#[derive(Clone, Debug)]
pub(crate) struct DisjointSetForest {
    parent: Vec<NodeId>,
}

impl DisjointSetForest {
    /// Creates `node_count` singleton classes.
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    pub(crate) fn is_root(&self, node: NodeId) -> bool {
        self.parent[node] == node
    }

    /// Returns the root of `node`'s class, pointing every record on the
    /// traversed path directly at it.
    pub(crate) fn find(&mut self, mut node: NodeId) -> NodeId {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Attaches root `child` under root `parent`.
    ///
    /// # Panics
    /// Panics when either argument is not a root or both name the same
    /// class; either would corrupt the forest.
    pub(crate) fn union(&mut self, parent: NodeId, child: NodeId) {
        assert!(self.is_root(parent), "union parent {parent} is not a root");
        assert!(self.is_root(child), "union child {child} is not a root");
        assert_ne!(parent, child, "union of class {parent} with itself");
        self.parent[child] = parent;
    }

    /// Number of parent hops from `node` to its root, without compressing.
    #[cfg(test)]
    pub(crate) fn depth(&self, mut node: NodeId) -> Option<usize> {
        for hops in 0..=self.parent.len() {
            let parent = *self.parent.get(node)?;
            if parent == node {
                return Some(hops);
            }
            node = parent;
        }
        None
    }
}

#[cfg(kani)]
mod kani_proofs {
    //! Bounded proof that caller-directed unions never introduce a cycle.

    use super::DisjointSetForest;

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_unions_stay_acyclic_4_nodes() {
        let mut forest = DisjointSetForest::new(4);
        for _ in 0..3 {
            let left: usize = kani::any();
            let right: usize = kani::any();
            kani::assume(left < 4 && right < 4);
            let left_root = forest.find(left);
            let right_root = forest.find(right);
            if left_root != right_root {
                forest.union(left_root, right_root);
            }
        }
        for node in 0..4 {
            let mut current = node;
            let mut hops = 0;
            while forest.parent[current] != current {
                current = forest.parent[current];
                hops += 1;
                kani::assert(hops <= 4, "parent chain must reach a root");
            }
        }
    }
}
