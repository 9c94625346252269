use std::fmt::Debug;
use num_traits::Float;
use log::warn;
use serde::Serialize;

use crate::data_structures::PriorityQueue;
use crate::graph::Graph;
use crate::Result;

/// Counters collected while the engine drains its queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Entries popped from the queue, stale ones included
    pub pops: usize,
    /// Popped entries discarded because a shorter distance was already known
    pub stale_entries: usize,
    /// Fresh entries pushed
    pub pushes: usize,
    /// Successful in-place decrease-key calls
    pub decrease_keys: usize,
    /// Edges that improved a tentative distance
    pub relaxations: usize,
}

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Distances from source to each vertex; `+inf` for unreachable vertices
    pub distances: Vec<W>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,

    /// Queue traffic of the run
    pub stats: SearchStats,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Finite distance to `vertex`, if it was reached
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distances
            .get(vertex)
            .copied()
            .filter(|d| d.is_finite())
    }

    /// Returns true if `vertex` was reached from the source
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Number of vertices reached from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }
}

/// Trait for shortest path algorithms driven by a caller-supplied queue
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices,
    /// using `queue` as the frontier
    fn compute_shortest_paths<Q>(
        &self,
        graph: &G,
        source: usize,
        queue: &mut Q,
    ) -> Result<ShortestPathResult<W>>
    where
        Q: PriorityQueue<usize, W> + ?Sized;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if !result.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != result.source {
            current = result.predecessors[current]?;
            path.push(current);
            if path.len() > result.predecessors.len() {
                warn!("predecessor chain from {} does not reach the source", target);
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}
