use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::data_structures::priority_queue::{check_priority, Priority, PriorityQueue};
use crate::{Error, Result};

/// Array-backed d-ary min-heap with a value -> slot index.
///
/// Every swap keeps `positions` in sync so `decrease_key` finds its entry in
/// O(1) and then sifts up in O(log_d n). `pop` pays for the wider fan-out with
/// `d` comparisons per level on the way down.
#[derive(Debug, Clone)]
pub struct DHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    /// Branching factor, at least 2
    d: usize,

    /// Heap-ordered (priority, value) pairs
    heap: Vec<(P, V)>,

    /// Current slot of every queued value
    positions: HashMap<V, usize>,
}

impl<V, P> DHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    /// Creates an empty heap with branching factor `d` (clamped to at least 2)
    pub fn new(d: usize) -> Self {
        DHeap {
            d: d.max(2),
            heap: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Creates an empty heap with room for `capacity` entries
    pub fn with_capacity(d: usize, capacity: usize) -> Self {
        DHeap {
            d: d.max(2),
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Picks the branching factor from graph density: `max(2, edges / vertices)`.
    ///
    /// Dense graphs issue many more decrease-keys than pops, so a flatter
    /// heap trades cheaper sift-ups for costlier sift-downs.
    pub fn for_graph(vertex_count: usize, edge_count: usize) -> Self {
        let d = if vertex_count == 0 {
            2
        } else {
            (edge_count / vertex_count).max(2)
        };
        debug!(
            "d-ary heap for {} vertices / {} edges uses d = {}",
            vertex_count, edge_count, d
        );
        Self::with_capacity(d, vertex_count)
    }

    /// Returns the branching factor
    pub fn arity(&self) -> usize {
        self.d
    }

    fn parent(&self, index: usize) -> usize {
        (index - 1) / self.d
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i].1, i);
        self.positions.insert(self.heap[j].1, j);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = self.parent(index);
            if self.heap[index].0 < self.heap[parent].0 {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let first_child = self.d * index + 1;
            if first_child >= len {
                break;
            }
            let last_child = (first_child + self.d).min(len);

            let mut smallest = index;
            for child in first_child..last_child {
                if self.heap[child].0 < self.heap[smallest].0 {
                    smallest = child;
                }
            }

            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.heap.len(), self.positions.len());
        for (index, (priority, value)) in self.heap.iter().enumerate() {
            assert_eq!(self.positions[value], index);
            if index > 0 {
                assert!(self.heap[self.parent(index)].0 <= *priority);
            }
        }
    }
}

impl<V, P> PriorityQueue<V, P> for DHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    fn name(&self) -> &'static str {
        "DHeap"
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        let priority = check_priority(priority)?;
        if self.positions.contains_key(&value) {
            return self.decrease_key(value, priority).map(|_| ());
        }

        let index = self.heap.len();
        self.heap.push((priority, value));
        self.positions.insert(value, index);
        self.sift_up(index);
        Ok(())
    }

    fn pop(&mut self) -> Result<(V, P)> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (priority, value) = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.positions.remove(&value);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((value, priority))
    }

    fn peek(&self) -> Option<(V, P)> {
        self.heap.first().map(|(priority, value)| (*value, *priority))
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        let new_priority = check_priority(new_priority)?;
        let index = match self.positions.get(&value) {
            Some(&index) => index,
            None => return Ok(false),
        };

        if new_priority >= self.heap[index].0 {
            return Ok(false);
        }

        self.heap[index].0 = new_priority;
        self.sift_up(index);
        Ok(true)
    }

    fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_is_clamped_and_derived_from_density() {
        assert_eq!(DHeap::<u32, u32>::new(0).arity(), 2);
        assert_eq!(DHeap::<u32, u32>::new(5).arity(), 5);
        assert_eq!(DHeap::<u32, u32>::for_graph(100, 150).arity(), 2);
        assert_eq!(DHeap::<u32, u32>::for_graph(100, 800).arity(), 8);
        assert_eq!(DHeap::<u32, u32>::for_graph(0, 0).arity(), 2);
    }

    #[test]
    fn pops_in_order_for_several_arities() {
        for d in 2..7 {
            let mut heap = DHeap::new(d);
            for (i, p) in [9u32, 4, 7, 1, 8, 2, 6, 3, 5, 0].iter().enumerate() {
                heap.push(*p, i).unwrap();
                heap.assert_invariants();
            }
            let mut popped = Vec::new();
            while let Ok((_, p)) = heap.pop() {
                heap.assert_invariants();
                popped.push(p);
            }
            assert_eq!(popped, (0..10).collect::<Vec<_>>(), "d = {}", d);
        }
    }

    #[test]
    fn decrease_key_moves_entry_to_root() {
        let mut heap = DHeap::new(3);
        for v in 0..20u32 {
            heap.push(100 + v, v).unwrap();
        }
        assert!(heap.decrease_key(17, 1).unwrap());
        heap.assert_invariants();
        assert_eq!(heap.peek(), Some((17, 1)));
        assert!(!heap.decrease_key(17, 1).unwrap());
        assert!(!heap.decrease_key(17, 50).unwrap());
        assert!(!heap.decrease_key(99, 0).unwrap());
    }

    #[test]
    fn push_of_existing_value_only_lowers() {
        let mut heap = DHeap::new(4);
        heap.push(10u32, 'a').unwrap();
        heap.push(20, 'a').unwrap();
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek(), Some(('a', 10)));
        heap.push(5, 'a').unwrap();
        assert_eq!(heap.peek(), Some(('a', 5)));
    }
}
