use std::fmt::Debug;

use ordered_float::OrderedFloat;

use crate::{Error, Result};

/// Keys that can order entries in a priority queue.
///
/// Beyond a total order, a priority must be able to say whether it is a real
/// number at all; `NaN` sorts fine inside `OrderedFloat` but is never a valid
/// distance and is rejected at every queue boundary.
pub trait Priority: Copy + Ord + Debug {
    /// Returns false for values that must never enter a queue
    fn is_valid(&self) -> bool {
        true
    }
}

macro_rules! impl_integer_priority {
    ($($t:ty),+) => {
        $(impl Priority for $t {})+
    };
}

impl_integer_priority!(u8, u16, u32, u64, usize, i32, i64);

impl Priority for OrderedFloat<f64> {
    fn is_valid(&self) -> bool {
        !self.0.is_nan()
    }
}

impl Priority for OrderedFloat<f32> {
    fn is_valid(&self) -> bool {
        !self.0.is_nan()
    }
}

/// Priorities usable by the radix heap.
///
/// `radix_key` must be monotone: `a <= b` implies `a.radix_key() <= b.radix_key()`
/// for every key that is `Some`. Keys must fit in 63 bits so that bucket
/// indices stay within `0..=63`; negative priorities have no key.
pub trait RadixKey: Priority {
    /// The floor a fresh radix heap starts from
    fn floor() -> Self;

    /// Order-preserving unsigned image of the priority
    fn radix_key(&self) -> Option<u64>;

    /// True for priorities that belong in the overflow bucket
    fn is_unbounded(&self) -> bool {
        false
    }
}

macro_rules! impl_unsigned_radix_key {
    ($($t:ty),+) => {
        $(
            impl RadixKey for $t {
                fn floor() -> Self {
                    0
                }

                fn radix_key(&self) -> Option<u64> {
                    Some(u64::from(*self))
                }
            }
        )+
    };
}

impl_unsigned_radix_key!(u8, u16, u32);

// Non-negative IEEE floats order the same way as their bit patterns.
impl RadixKey for OrderedFloat<f64> {
    fn floor() -> Self {
        OrderedFloat(0.0)
    }

    fn radix_key(&self) -> Option<u64> {
        if self.0 < 0.0 || self.0.is_nan() {
            None
        } else if self.0 == 0.0 {
            Some(0)
        } else {
            Some(self.0.to_bits())
        }
    }

    fn is_unbounded(&self) -> bool {
        self.0.is_infinite()
    }
}

impl RadixKey for OrderedFloat<f32> {
    fn floor() -> Self {
        OrderedFloat(0.0)
    }

    fn radix_key(&self) -> Option<u64> {
        OrderedFloat(f64::from(self.0)).radix_key()
    }

    fn is_unbounded(&self) -> bool {
        self.0.is_infinite()
    }
}

/// Rejects priorities that fail [`Priority::is_valid`].
pub(crate) fn check_priority<P: Priority>(priority: P) -> Result<P> {
    if priority.is_valid() {
        Ok(priority)
    } else {
        Err(Error::InvalidPriority(format!("{:?}", priority)))
    }
}

/// Capability set shared by every queue the shortest-path engine can drive.
///
/// Entries are `(priority, value)` pairs where `value` identifies the entry.
/// Queues that track membership keep each value at most once: pushing a value
/// that is already present degrades to [`decrease_key`](Self::decrease_key)
/// and is a no-op when the new priority is not lower.
///
/// Structural misuse (popping an empty queue, invalid priorities) is reported
/// as an [`Error`]; a rejected decrease is the ordinary `Ok(false)` outcome.
pub trait PriorityQueue<V, P> {
    /// Short human readable name of the implementation
    fn name(&self) -> &'static str;

    /// Whether `decrease_key` and `contains` are backed by a membership index.
    ///
    /// Queues returning false accept duplicate values and rely on the caller
    /// to discard stale entries.
    fn supports_decrease_key(&self) -> bool {
        true
    }

    /// Inserts `value` with `priority`
    fn push(&mut self, priority: P, value: V) -> Result<()>;

    /// Removes and returns an entry with the minimum priority
    fn pop(&mut self) -> Result<(V, P)>;

    /// Returns an entry with the minimum priority without removing it
    fn peek(&self) -> Option<(V, P)>;

    /// Lowers the priority of `value`.
    ///
    /// Returns `Ok(true)` only if `new_priority` is strictly below the current
    /// priority; otherwise nothing changes and `Ok(false)` is returned.
    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool>;

    /// Returns true if `value` is currently queued
    fn contains(&self, value: &V) -> bool;

    /// Returns the number of queued entries
    fn len(&self) -> usize;

    /// Returns true if the queue holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry
    fn clear(&mut self);
}

impl<V, P, Q> PriorityQueue<V, P> for Box<Q>
where
    Q: PriorityQueue<V, P> + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports_decrease_key(&self) -> bool {
        (**self).supports_decrease_key()
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        (**self).push(priority, value)
    }

    fn pop(&mut self) -> Result<(V, P)> {
        (**self).pop()
    }

    fn peek(&self) -> Option<(V, P)> {
        (**self).peek()
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        (**self).decrease_key(value, new_priority)
    }

    fn contains(&self, value: &V) -> bool {
        (**self).contains(value)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
