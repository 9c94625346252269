use crate::graph::traits::{is_valid_weight, Graph, MutableGraph};
use crate::{Error, Result};
use num_traits::Float;
use std::fmt::Debug;

/// A directed graph implementation using adjacency lists
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// Outgoing edges for each vertex: vertex_id -> [(target_vertex, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Number of directed edges
    edge_count: usize,
}

impl<W> DirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            adjacency: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph with `vertices` vertices from directed `(from, to, weight)` triples
    pub fn from_edges<I>(vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::with_capacity(vertices);
        for (from, to, weight) in edges {
            graph.checked_edge(from, to, weight)?;
            graph.add_edge(from, to, weight);
        }
        Ok(graph)
    }

    /// Builds a graph from undirected triples, adding both directions of each edge
    pub fn from_undirected_edges<I>(vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::with_capacity(vertices);
        for (u, v, weight) in edges {
            graph.checked_edge(u, v, weight)?;
            graph.add_undirected_edge(u, v, weight);
        }
        Ok(graph)
    }

    fn checked_edge(&self, from: usize, to: usize, weight: W) -> Result<()> {
        if !self.has_vertex(from) {
            return Err(Error::InvalidVertex(from));
        }
        if !self.has_vertex(to) {
            return Err(Error::InvalidVertex(to));
        }
        if !is_valid_weight(weight) {
            return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate that the graph has no negative or NaN weights
    pub fn validate_non_negative(&self) -> bool {
        self.adjacency
            .iter()
            .flatten()
            .all(|(_, weight)| is_valid_weight(*weight))
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || !is_valid_weight(weight) {
            return false;
        }
        self.adjacency[from].push((to, weight));
        self.edge_count += 1;
        true
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        let edges = match self.adjacency.get_mut(from) {
            Some(edges) => edges,
            None => return false,
        };
        let before = edges.len();
        edges.retain(|(target, _)| *target != to);
        let removed = before - edges.len();
        self.edge_count -= removed;
        removed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn undirected_edges_are_added_both_ways() {
        let graph = DirectedGraph::from_undirected_edges(
            4,
            vec![
                (0, 1, OrderedFloat(4.0)),
                (0, 2, OrderedFloat(2.0)),
                (1, 2, OrderedFloat(1.0)),
                (1, 3, OrderedFloat(5.0)),
                (2, 3, OrderedFloat(8.0)),
            ],
        )
        .unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(graph.outgoing_edges(0).count(), 2);
        assert_eq!(graph.outgoing_edges(3).count(), 2);
        assert_eq!(graph.get_edge_weight(3, 1), Some(OrderedFloat(5.0)));
        assert!((graph.density() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_edges() {
        let negative = DirectedGraph::from_edges(2, vec![(0, 1, OrderedFloat(-1.0))]);
        assert!(matches!(negative, Err(Error::NegativeWeight(w)) if w == -1.0));
        let missing = DirectedGraph::from_edges(2, vec![(0, 5, OrderedFloat(1.0))]);
        assert!(matches!(missing, Err(Error::InvalidVertex(5))));

        let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(2);
        assert!(!graph.add_edge(0, 1, OrderedFloat(f64::NAN)));
        assert!(!graph.add_undirected_edge(0, 1, OrderedFloat(f64::NAN)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.validate_non_negative());
    }

    #[test]
    fn nan_weights_are_rejected() {
        let directed = DirectedGraph::from_edges(2, vec![(0, 1, OrderedFloat(f64::NAN))]);
        assert!(matches!(directed, Err(Error::NegativeWeight(w)) if w.is_nan()));
        let undirected = DirectedGraph::from_undirected_edges(
            3,
            vec![(0, 1, OrderedFloat(1.0)), (1, 2, OrderedFloat(f64::NAN))],
        );
        assert!(matches!(undirected, Err(Error::NegativeWeight(w)) if w.is_nan()));

        assert!(is_valid_weight(OrderedFloat(0.0)));
        assert!(is_valid_weight(OrderedFloat(f64::INFINITY)));
        assert!(!is_valid_weight(OrderedFloat(f64::NAN)));
        assert!(!is_valid_weight(-0.5_f64));
    }

    #[test]
    fn remove_edge_updates_count() {
        let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        graph.add_edge(a, b, OrderedFloat(1.0));
        graph.add_edge(a, b, OrderedFloat(2.0));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.remove_edge(a, b));
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.remove_edge(a, b));
        assert!(!graph.remove_edge(9, b));
    }
}
