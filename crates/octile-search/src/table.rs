use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use log::warn;
use octile_core::Coordinate;

use crate::report::Path;

/// Stable handle to a record in a [`NodeTable`].
///
/// Records are never moved or removed during a search, so a handle stays
/// valid until the table is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fields every engine keeps per node.
pub(crate) trait SearchNode {
    fn coordinate(&self) -> Coordinate;
    /// Back-pointer used for path reconstruction; `UNSET` on the root.
    fn parent(&self) -> Coordinate;
}

/// Per-search owner of node records, keyed by coordinate.
///
/// Storage is an append-only arena addressed by [`NodeId`] plus a hash index
/// from coordinate to handle.
#[derive(Debug)]
pub(crate) struct NodeTable<N> {
    nodes: Vec<N>,
    index: HashMap<Coordinate, NodeId>,
}

impl<N> Default for NodeTable<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<N: SearchNode> NodeTable<N> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop every record, keeping allocations for the next search.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Handle of the record for `c`, if one exists.
    #[inline]
    pub(crate) fn id(&self, c: Coordinate) -> Option<NodeId> {
        self.index.get(&c).copied()
    }

    /// Record for `c`, if one exists.
    #[inline]
    pub(crate) fn get(&self, c: Coordinate) -> Option<&N> {
        self.id(c).map(|id| &self.nodes[id.index()])
    }

    /// Store `node` under its coordinate.
    ///
    /// An existing record for the same coordinate is overwritten in place and
    /// keeps its handle.
    pub(crate) fn insert(&mut self, node: N) -> NodeId {
        let c = node.coordinate();
        if let Some(id) = self.id(c) {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.index.insert(c, id);
        id
    }

    /// Walk parent links from `goal` back to `start` and return the path in
    /// start → goal order.
    ///
    /// Returns an empty path if the chain is broken, which would indicate a
    /// table that was not produced by a successful search.
    pub(crate) fn reconstruct(&self, start: Coordinate, goal: Coordinate) -> Path {
        let mut path = Vec::new();
        let mut current = goal;
        // A chain longer than the table means a cycle.
        for _ in 0..=self.nodes.len() {
            path.push(current);
            if current == start {
                path.reverse();
                return path;
            }
            match self.get(current) {
                Some(node) => current = node.parent(),
                None => break,
            }
        }
        warn!("broken parent chain from {goal} back to {start}");
        Vec::new()
    }
}

impl<N> Index<NodeId> for NodeTable<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id.index()]
    }
}

impl<N> IndexMut<NodeId> for NodeTable<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.index()]
    }
}
