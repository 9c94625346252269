use std::cmp::Reverse;
use std::collections::BinaryHeap as StdBinaryHeap;
use std::fmt::Debug;

use crate::data_structures::priority_queue::{check_priority, Priority, PriorityQueue};
use crate::{Error, Result};

/// A wrapper around the standard `BinaryHeap` without a membership index.
///
/// Every push inserts a fresh entry, so a value may be queued several times at
/// different priorities. `decrease_key` is not supported (it always reports
/// `false`) and the shortest-path engine falls back to pushing duplicates and
/// discarding the stale ones when they are popped.
#[derive(Debug, Clone)]
pub struct LazyHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Priority,
{
    /// The underlying max-heap, reversed into a min-heap
    heap: StdBinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> LazyHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Priority,
{
    /// Creates a new empty queue
    pub fn new() -> Self {
        LazyHeap {
            heap: StdBinaryHeap::new(),
        }
    }

    /// Creates a new empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        LazyHeap {
            heap: StdBinaryHeap::with_capacity(capacity),
        }
    }
}

impl<V, P> Default for LazyHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityQueue<V, P> for LazyHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Priority,
{
    fn name(&self) -> &'static str {
        "LazyHeap"
    }

    fn supports_decrease_key(&self) -> bool {
        false
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        let priority = check_priority(priority)?;
        self.heap.push(Reverse((priority, value)));
        Ok(())
    }

    fn pop(&mut self) -> Result<(V, P)> {
        self.heap
            .pop()
            .map(|Reverse((priority, value))| (value, priority))
            .ok_or(Error::EmptyQueue)
    }

    fn peek(&self) -> Option<(V, P)> {
        self.heap
            .peek()
            .map(|Reverse((priority, value))| (*value, *priority))
    }

    fn decrease_key(&mut self, _value: V, new_priority: P) -> Result<bool> {
        check_priority(new_priority)?;
        Ok(false)
    }

    fn contains(&self, _value: &V) -> bool {
        false
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}
