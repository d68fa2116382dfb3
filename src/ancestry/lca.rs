use alloc::vec::Vec;

use crate::tree::{NodeId, Tree};

use super::range_min::RangeMinQuery;

/// Constant-time ancestry queries over a fixed tree.
///
/// Built from the Euler tour of the tree: the lowest common ancestor of two
/// nodes is the shallowest node visited between their first occurrences,
/// found with a [`RangeMinQuery`] over `(level, node)` pairs.
/// See <https://cp-algorithms.com/graph/lca.html>.
///
/// The structure only stores derived data, so it can be shared read-only
/// between any number of reconciliations over the same species tree. The
/// tree must not change after construction, and every queried node must
/// belong to it.
#[derive(Debug, Clone)]
pub struct AncestorStructure {
    /// Index of each node's first occurrence in the Euler tour.
    first_visit: Vec<usize>,
    /// Depth of each node, root = 0.
    level: Vec<u32>,
    tour: RangeMinQuery<(u32, NodeId)>,
}

impl AncestorStructure {
    /// Precompute the Euler tour and its sparse table.
    ///
    /// Complexity: O(V log V), with V the number of nodes in `tree`.
    pub fn new(tree: &Tree) -> Self {
        let n = tree.len();
        let mut first_visit = alloc::vec![usize::MAX; n];
        let mut level = alloc::vec![0u32; n];
        let mut tour: Vec<(u32, NodeId)> = Vec::with_capacity(2 * n);

        // (node, index of the next child to descend into)
        let mut stack: Vec<(NodeId, usize)> = alloc::vec![(tree.root(), 0)];
        first_visit[tree.root() as usize] = 0;
        tour.push((0, tree.root()));

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let depth = level[node as usize];
            match tree.children_of(node).get(next) {
                Some(&child) => {
                    top.1 += 1;
                    level[child as usize] = depth + 1;
                    first_visit[child as usize] = tour.len();
                    tour.push((depth + 1, child));
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    if let Some(&(parent, _)) = stack.last() {
                        tour.push((level[parent as usize], parent));
                    }
                }
            }
        }

        Self {
            first_visit,
            level,
            tour: RangeMinQuery::new(&tour),
        }
    }

    /// Number of nodes of the tree this structure was built from.
    pub fn len(&self) -> usize {
        self.level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_empty()
    }

    /// Lowest common ancestor of two nodes. O(1).
    pub fn lowest_common_ancestor(&self, first: NodeId, second: NodeId) -> NodeId {
        let a = self.first_visit[first as usize];
        let b = self.first_visit[second as usize];
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // Non-empty range over the tour of a valid tree.
        match self.tour.query(lo, hi + 1) {
            Some(&(_, node)) => node,
            None => first,
        }
    }

    /// Whether `first` is an ancestor of `second` or equal to it. O(1).
    pub fn is_ancestor_of(&self, first: NodeId, second: NodeId) -> bool {
        self.lowest_common_ancestor(first, second) == first
    }

    /// Whether `first` is an ancestor of `second` distinct from it. O(1).
    pub fn is_strict_ancestor_of(&self, first: NodeId, second: NodeId) -> bool {
        first != second && self.is_ancestor_of(first, second)
    }

    /// Whether one node is an ancestor of the other. O(1).
    pub fn is_comparable(&self, first: NodeId, second: NodeId) -> bool {
        let lca = self.lowest_common_ancestor(first, second);
        lca == first || lca == second
    }

    /// Depth of a node, the root being at level 0. O(1).
    pub fn level(&self, node: NodeId) -> u32 {
        self.level[node as usize]
    }

    /// Number of edges on the path between two nodes. O(1).
    pub fn distance(&self, first: NodeId, second: NodeId) -> u32 {
        let lca = self.lowest_common_ancestor(first, second);
        self.level(first) + self.level(second) - 2 * self.level(lca)
    }
}

/// Build the ancestry structure of a species tree.
pub fn build_ancestor_structure(species_tree: &Tree) -> AncestorStructure {
    AncestorStructure::new(species_tree)
}
