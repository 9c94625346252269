use crate::data_structures::PriorityQueue;
use crate::Result;

/// Transparent queue wrapper that counts operations and records the largest
/// number of entries held at once.
///
/// It forwards every call unchanged, so wrapping a queue never alters what the
/// shortest-path engine computes.
#[derive(Debug, Clone, Default)]
pub struct Instrumented<Q> {
    inner: Q,
    pushes: usize,
    pops: usize,
    decrease_keys: usize,
    peak_len: usize,
}

impl<Q> Instrumented<Q> {
    /// Wraps `inner`
    pub fn new(inner: Q) -> Self {
        Instrumented {
            inner,
            pushes: 0,
            pops: 0,
            decrease_keys: 0,
            peak_len: 0,
        }
    }

    /// Number of `push` calls that succeeded
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Number of `pop` calls that returned an entry
    pub fn pops(&self) -> usize {
        self.pops
    }

    /// Number of `decrease_key` calls that lowered a priority
    pub fn decrease_keys(&self) -> usize {
        self.decrease_keys
    }

    /// High-water mark of the queue length
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Returns the wrapped queue
    pub fn into_inner(self) -> Q {
        self.inner
    }
}

impl<V, P, Q> PriorityQueue<V, P> for Instrumented<Q>
where
    Q: PriorityQueue<V, P>,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn supports_decrease_key(&self) -> bool {
        self.inner.supports_decrease_key()
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        self.inner.push(priority, value)?;
        self.pushes += 1;
        self.peak_len = self.peak_len.max(self.inner.len());
        Ok(())
    }

    fn pop(&mut self) -> Result<(V, P)> {
        let entry = self.inner.pop()?;
        self.pops += 1;
        Ok(entry)
    }

    fn peek(&self) -> Option<(V, P)> {
        self.inner.peek()
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        let lowered = self.inner.decrease_key(value, new_priority)?;
        if lowered {
            self.decrease_keys += 1;
        }
        Ok(lowered)
    }

    fn contains(&self, value: &V) -> bool {
        self.inner.contains(value)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn clear(&mut self) {
        self.inner.clear()
    }
}
