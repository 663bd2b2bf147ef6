//! Open sets over [`NodeId`] handles.
//!
//! [`IndexedFrontier`] is a binary min-heap that tracks the position of each
//! handle so A* can lower a queued node's priority in place.
//! [`QueueEntry`] is the plain `BinaryHeap` element used where duplicate
//! entries are acceptable.

use std::cmp::Ordering;

use crate::table::NodeId;

/// Heap key: lower `f` first, ties broken by higher `g`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Priority {
    pub(crate) f: f64,
    pub(crate) g: f64,
}

impl Priority {
    #[inline]
    pub(crate) fn new(f: f64, g: f64) -> Self {
        Self { f, g }
    }

    /// Whether `self` must be extracted before `other`.
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        self.order(other) == Ordering::Less
    }

    /// Extraction order, `Less` meaning "comes out first".
    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| other.g.total_cmp(&self.g))
    }
}

// ---------------------------------------------------------------------------
// IndexedFrontier
// ---------------------------------------------------------------------------

const ABSENT: usize = usize::MAX;

/// Binary min-heap with decrease-key.
#[derive(Debug, Default)]
pub(crate) struct IndexedFrontier {
    heap: Vec<(NodeId, Priority)>,
    /// Heap position of each handle, indexed by `NodeId`.
    slots: Vec<usize>,
}

impl IndexedFrontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.index()).is_some_and(|&p| p != ABSENT)
    }

    /// Queue `id`. The handle must not already be queued.
    pub(crate) fn push(&mut self, id: NodeId, priority: Priority) {
        debug_assert!(!self.contains(id), "handle queued twice");
        if self.slots.len() <= id.index() {
            self.slots.resize(id.index() + 1, ABSENT);
        }
        let pos = self.heap.len();
        self.heap.push((id, priority));
        self.slots[id.index()] = pos;
        self.sift_up(pos);
    }

    /// Remove and return the handle that comes first.
    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (id, _) = self.heap.pop()?;
        self.slots[id.index()] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(id)
    }

    /// Lower the priority of a queued handle, restoring heap order.
    ///
    /// Returns `false` (and does nothing) if `id` is not queued.
    pub(crate) fn decrease(&mut self, id: NodeId, priority: Priority) -> bool {
        if !self.contains(id) {
            return false;
        }
        let pos = self.slots[id.index()];
        debug_assert!(!self.heap[pos].1.precedes(&priority), "priority increased");
        self.heap[pos].1 = priority;
        self.sift_up(pos);
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].0.index()] = a;
        self.slots[self.heap[b].0.index()] = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].1.precedes(&self.heap[parent].1) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.heap[right].1.precedes(&self.heap[left].1) {
                best = right;
            }
            if !self.heap[best].1.precedes(&self.heap[pos].1) {
                break;
            }
            self.swap(pos, best);
            pos = best;
        }
    }
}

// ---------------------------------------------------------------------------
// QueueEntry
// ---------------------------------------------------------------------------

/// A `BinaryHeap` element carrying a snapshot of its node's priority.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueueEntry {
    pub(crate) id: NodeId,
    pub(crate) priority: Priority,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the first-to-extract entry.
        other
            .priority
            .order(&self.priority)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
