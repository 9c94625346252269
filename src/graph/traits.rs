use std::fmt::Debug;
use num_traits::Float;

/// Trait representing a weighted directed graph over vertices `0..vertex_count()`
pub trait Graph<W>: Debug
where
    W: Float + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of directed edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex, in insertion order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_edges(from).any(|(target, _)| target == to)
    }

    /// Gets the weight of the first edge between the two vertices
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }

    /// Average out-degree, used to tune d-ary heaps
    fn density(&self) -> f64 {
        if self.vertex_count() == 0 {
            0.0
        } else {
            self.edge_count() as f64 / self.vertex_count() as f64
        }
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Debug + Copy,
{
    /// Adds a vertex to the graph and returns its ID
    fn add_vertex(&mut self) -> usize;

    /// Adds a directed edge; rejects unknown vertices and negative or NaN weights
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool;

    /// Adds the edge in both directions
    fn add_undirected_edge(&mut self, u: usize, v: usize, weight: W) -> bool {
        if !self.has_vertex(u) || !self.has_vertex(v) || !is_valid_weight(weight) {
            return false;
        }
        self.add_edge(u, v, weight) && self.add_edge(v, u, weight)
    }

    /// Removes every edge from `from` to `to`
    fn remove_edge(&mut self, from: usize, to: usize) -> bool;
}

/// Edge weights must be non-negative numbers; NaN is never a valid weight
pub fn is_valid_weight<W: Float>(weight: W) -> bool {
    !weight.is_nan() && weight >= W::zero()
}
