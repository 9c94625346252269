//! Radix heap: a monotone bucket queue for Dijkstra.
//!
//! Dijkstra never asks for a priority below the last extracted minimum, so the
//! queue can keep entries in coarse buckets keyed by how far they sit above
//! that floor and only sort them lazily.
//!
//! Bucket `i` (for `1 <= i <= 63`) holds entries whose key first differs from
//! the floor's key at bit `i - 1`; bucket 0 holds entries equal to the floor
//! and bucket 64 holds unbounded (infinite) priorities. Using the highest
//! differing bit rather than the plain difference keeps bucket boundaries
//! fixed while the floor moves: when bucket `i` is emptied into finer buckets,
//! every entry in a bucket above `i` still differs from the new floor at the
//! same bit, so the first non-empty bucket always holds the global minimum.
//!
//! | Operation      | Complexity              |
//! |----------------|-------------------------|
//! | `push`         | O(1)                    |
//! | `pop`          | O(log C) amortized      |
//! | `decrease_key` | O(1)                    |
//! | `contains`     | O(1)                    |
//!
//! where C is the spread between the largest key and the floor.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::mem;

use crate::data_structures::priority_queue::{check_priority, PriorityQueue, RadixKey};
use crate::{Error, Result};

/// Buckets 0..=63 for finite priorities
const FINITE_BUCKETS: usize = 64;

/// Bucket for unbounded priorities
const OVERFLOW: usize = FINITE_BUCKETS;

/// Monotone radix heap with a value -> (bucket, slot) index
#[derive(Debug, Clone)]
pub struct RadixHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: RadixKey,
{
    buckets: Vec<Vec<(P, V)>>,
    positions: HashMap<V, (usize, usize)>,
    last_popped: P,
    last_key: u64,
    len: usize,
}

impl<V, P> RadixHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: RadixKey,
{
    /// Creates an empty heap whose floor is `P::floor()`
    pub fn new() -> Self {
        let floor = P::floor();
        RadixHeap {
            buckets: vec![Vec::new(); FINITE_BUCKETS + 1],
            positions: HashMap::new(),
            last_popped: floor,
            last_key: floor.radix_key().unwrap_or(0),
            len: 0,
        }
    }

    /// Priority of the most recently popped entry (the floor for new pushes)
    pub fn last_popped(&self) -> P {
        self.last_popped
    }

    /// Bucket currently holding `value`
    pub fn bucket_of(&self, value: &V) -> Option<usize> {
        self.positions.get(value).map(|&(bucket, _)| bucket)
    }

    fn bucket_for(&self, priority: P, key: u64) -> usize {
        if priority.is_unbounded() {
            return OVERFLOW;
        }
        let diff = key ^ self.last_key;
        if diff == 0 {
            0
        } else {
            // Keys fit in 63 bits, so this stays below OVERFLOW.
            ((u64::BITS - diff.leading_zeros()) as usize).min(FINITE_BUCKETS - 1)
        }
    }

    fn key_of(&self, priority: P) -> Result<u64> {
        if priority < self.last_popped {
            return Err(Error::InvalidPriority(format!(
                "{:?} is below the last popped priority {:?}",
                priority, self.last_popped
            )));
        }
        priority
            .radix_key()
            .ok_or_else(|| Error::InvalidPriority(format!("{:?} has no radix key", priority)))
    }

    fn insert(&mut self, priority: P, key: u64, value: V) {
        let bucket = self.bucket_for(priority, key);
        let slot = self.buckets[bucket].len();
        self.buckets[bucket].push((priority, value));
        self.positions.insert(value, (bucket, slot));
        self.len += 1;
    }

    fn remove_at(&mut self, bucket: usize, slot: usize) -> (P, V) {
        let (priority, value) = self.buckets[bucket].swap_remove(slot);
        if let Some(&(_, moved)) = self.buckets[bucket].get(slot) {
            self.positions.insert(moved, (bucket, slot));
        }
        self.positions.remove(&value);
        self.len -= 1;
        (priority, value)
    }

    fn first_non_empty(&self) -> Option<usize> {
        self.buckets.iter().position(|bucket| !bucket.is_empty())
    }

    fn min_slot(&self, bucket: usize) -> Option<usize> {
        self.buckets[bucket]
            .iter()
            .enumerate()
            .min_by_key(|(_, (priority, _))| *priority)
            .map(|(slot, _)| slot)
    }

    /// Spreads the remaining entries of `bucket` over finer buckets relative
    /// to the new floor.
    fn redistribute(&mut self, bucket: usize) {
        let entries = mem::take(&mut self.buckets[bucket]);
        for (priority, value) in entries {
            let key = priority.radix_key().unwrap_or(self.last_key);
            let target = self.bucket_for(priority, key);
            debug_assert!(target < bucket || bucket == OVERFLOW);
            let slot = self.buckets[target].len();
            self.buckets[target].push((priority, value));
            self.positions.insert(value, (target, slot));
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut count = 0;
        for (bucket, entries) in self.buckets.iter().enumerate() {
            for (slot, (priority, value)) in entries.iter().enumerate() {
                assert_eq!(self.positions[value], (bucket, slot));
                assert!(*priority >= self.last_popped);
                count += 1;
            }
        }
        assert_eq!(count, self.len);
        assert_eq!(self.positions.len(), self.len);
    }
}

impl<V, P> Default for RadixHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: RadixKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityQueue<V, P> for RadixHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: RadixKey,
{
    fn name(&self) -> &'static str {
        "RadixHeap"
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        let priority = check_priority(priority)?;
        if self.positions.contains_key(&value) {
            return self.decrease_key(value, priority).map(|_| ());
        }
        let key = self.key_of(priority)?;
        self.insert(priority, key, value);
        Ok(())
    }

    fn pop(&mut self) -> Result<(V, P)> {
        let bucket = self.first_non_empty().ok_or(Error::EmptyQueue)?;
        let slot = self.min_slot(bucket).ok_or(Error::EmptyQueue)?;
        let (priority, value) = self.remove_at(bucket, slot);

        self.last_popped = priority;
        if let Some(key) = priority.radix_key() {
            self.last_key = key;
        }

        if bucket > 0 && !self.buckets[bucket].is_empty() {
            self.redistribute(bucket);
        }
        Ok((value, priority))
    }

    fn peek(&self) -> Option<(V, P)> {
        let bucket = self.first_non_empty()?;
        let slot = self.min_slot(bucket)?;
        let (priority, value) = self.buckets[bucket][slot];
        Some((value, priority))
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        let new_priority = check_priority(new_priority)?;
        let (bucket, slot) = match self.positions.get(&value) {
            Some(&position) => position,
            None => return Ok(false),
        };
        if new_priority >= self.buckets[bucket][slot].0 {
            return Ok(false);
        }

        let key = self.key_of(new_priority)?;
        self.remove_at(bucket, slot);
        self.insert(new_priority, key, value);
        Ok(true)
    }

    fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.positions.clear();
        self.len = 0;
        self.last_popped = P::floor();
        self.last_key = self.last_popped.radix_key().unwrap_or(0);
    }
}
