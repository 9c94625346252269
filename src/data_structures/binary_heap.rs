use std::fmt::Debug;
use std::hash::Hash;

use crate::data_structures::d_heap::DHeap;
use crate::data_structures::priority_queue::{Priority, PriorityQueue};
use crate::Result;

/// Binary min-heap with decrease-key support.
///
/// This is the `d = 2` case of [`DHeap`]: children of slot `i` live at
/// `2i + 1` and `2i + 2`, and a value -> slot map makes `contains` O(1) and
/// `decrease_key` O(log n).
#[derive(Debug, Clone)]
pub struct BinaryHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    inner: DHeap<V, P>,
}

impl<V, P> BinaryHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    /// Creates a new empty binary heap
    pub fn new() -> Self {
        BinaryHeap { inner: DHeap::new(2) }
    }

    /// Creates a new empty binary heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        BinaryHeap {
            inner: DHeap::with_capacity(2, capacity),
        }
    }
}

impl<V, P> Default for BinaryHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityQueue<V, P> for BinaryHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    fn name(&self) -> &'static str {
        "BinaryHeap"
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        self.inner.push(priority, value)
    }

    fn pop(&mut self) -> Result<(V, P)> {
        self.inner.pop()
    }

    fn peek(&self) -> Option<(V, P)> {
        self.inner.peek()
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        self.inner.decrease_key(value, new_priority)
    }

    fn contains(&self, value: &V) -> bool {
        self.inner.contains(value)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear()
    }
}
