use std::fmt::Debug;
use num_traits::Float;
use log::{debug, trace};

use crate::graph::Graph;
use crate::algorithm::{SearchStats, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::PriorityQueue;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm over any [`PriorityQueue`].
///
/// The queue is supplied by the caller and may already hold entries (for
/// example every vertex at `+inf`); the source is seeded with a push, which
/// lowers an existing entry when the queue tracks membership.
///
/// Edge weights must be non-negative. This is not checked inside the loop:
/// graphs built through [`MutableGraph`](crate::graph::MutableGraph) already
/// refuse negative weights.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths<Q>(
        &self,
        graph: &G,
        source: usize,
        queue: &mut Q,
    ) -> Result<ShortestPathResult<W>>
    where
        Q: PriorityQueue<usize, W> + ?Sized,
    {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();
        let mut distances = vec![W::infinity(); n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut stats = SearchStats::default();
        let track_membership = queue.supports_decrease_key();

        distances[source] = W::zero();
        queue.push(W::zero(), source)?;
        stats.pushes += 1;

        while !queue.is_empty() {
            let (u, dist_u) = queue.pop()?;
            stats.pops += 1;

            let recorded = *distances.get(u).ok_or(Error::InvalidVertex(u))?;
            if dist_u > recorded {
                stats.stale_entries += 1;
                continue;
            }
            trace!("settled {} at {:?}", u, dist_u);

            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = dist_u + weight;
                if candidate >= distances[v] {
                    continue;
                }

                distances[v] = candidate;
                predecessors[v] = Some(u);
                stats.relaxations += 1;

                if track_membership && queue.contains(&v) {
                    if queue.decrease_key(v, candidate)? {
                        stats.decrease_keys += 1;
                    }
                } else {
                    queue.push(candidate, v)?;
                    stats.pushes += 1;
                }
            }
        }

        debug!(
            "{} from {}: {} pops ({} stale), {} pushes, {} decrease-keys",
            queue.name(),
            source,
            stats.pops,
            stats.stale_entries,
            stats.pushes,
            stats.decrease_keys
        );

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
            stats,
        })
    }
}

/// Runs [`Dijkstra`] from `source` over `queue`
pub fn dijkstra<W, G, Q>(graph: &G, source: usize, queue: &mut Q) -> Result<ShortestPathResult<W>>
where
    W: Float + Debug + Copy,
    G: Graph<W>,
    Q: PriorityQueue<usize, W> + ?Sized,
{
    Dijkstra::new().compute_shortest_paths(graph, source, queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::{BinaryHeap, LazyHeap};
    use crate::graph::DirectedGraph;
    use ordered_float::OrderedFloat;

    fn diamond() -> DirectedGraph<OrderedFloat<f64>> {
        DirectedGraph::from_edges(
            4,
            vec![
                (0, 1, OrderedFloat(1.0)),
                (0, 2, OrderedFloat(4.0)),
                (1, 2, OrderedFloat(1.0)),
                (2, 3, OrderedFloat(1.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn lazy_queue_discards_stale_entries() {
        let mut queue = LazyHeap::new();
        let result = dijkstra(&diamond(), 0, &mut queue).unwrap();
        assert_eq!(result.distances[3], OrderedFloat(3.0));
        // Vertex 2 is queued at 4 and again at 2; the first copy is stale.
        assert_eq!(result.stats.stale_entries, 1);
        assert_eq!(result.stats.decrease_keys, 0);
    }

    #[test]
    fn tracking_queue_uses_decrease_key() {
        let mut queue = BinaryHeap::new();
        let result = dijkstra(&diamond(), 0, &mut queue).unwrap();
        assert_eq!(result.distances[3], OrderedFloat(3.0));
        assert_eq!(result.stats.stale_entries, 0);
        assert_eq!(result.stats.decrease_keys, 1);
        assert_eq!(result.stats.pops, 4);
    }

    #[test]
    fn unknown_source() {
        let mut queue = BinaryHeap::new();
        assert!(matches!(
            dijkstra(&diamond(), 9, &mut queue),
            Err(Error::SourceNotFound)
        ));
    }
}
