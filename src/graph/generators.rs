use crate::graph::io::{EdgeRecord, GraphData, NodeLabel};
use crate::Error;
use log::{debug, warn};
use rand::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Edge-count presets for generated graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// `2n` edges
    Sparse,
    /// Halfway between sparse and dense
    Middle,
    /// The complete graph, `n(n-1)/2` edges
    Dense,
}

impl Density {
    /// Number of undirected edges this preset asks for on `num_nodes` nodes
    pub fn edges_for(self, num_nodes: usize) -> usize {
        let dense = num_nodes.saturating_mul(num_nodes.saturating_sub(1)) / 2;
        let sparse = num_nodes.saturating_mul(2).min(dense);
        match self {
            Density::Sparse => sparse,
            Density::Middle => sparse + (dense - sparse) / 2,
            Density::Dense => dense,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Density::Sparse => "sparse",
            Density::Middle => "middle",
            Density::Dense => "dense",
        })
    }
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sparse" | "s" => Ok(Density::Sparse),
            "middle" | "m" => Ok(Density::Middle),
            "dense" | "d" => Ok(Density::Dense),
            other => Err(Error::InvalidConfig(format!("unknown density '{}'", other))),
        }
    }
}

/// Generates a random weighted undirected graph with `num_nodes` nodes and
/// `num_edges` distinct edges.
///
/// Nodes are labelled `0..num_nodes`; there are no self-loops and no parallel
/// edges. Weights are integers drawn uniformly from `weight_range` (inclusive).
/// Asking for more edges than a simple graph can hold yields the complete graph.
pub fn generate_weighted_graph<R: Rng>(
    num_nodes: usize,
    num_edges: usize,
    weight_range: (u32, u32),
    rng: &mut R,
) -> GraphData {
    let max_edges = num_nodes.saturating_mul(num_nodes.saturating_sub(1)) / 2;
    let target = if num_edges > max_edges {
        warn!(
            "{} edges requested but {} nodes allow at most {}",
            num_edges, num_nodes, max_edges
        );
        max_edges
    } else {
        num_edges
    };

    let (low, high) = if weight_range.0 <= weight_range.1 {
        weight_range
    } else {
        (weight_range.1, weight_range.0)
    };

    let mut seen = HashSet::with_capacity(target);
    let mut edges = Vec::with_capacity(target);
    while edges.len() < target {
        let u = rng.gen_range(0..num_nodes);
        let v = rng.gen_range(0..num_nodes);
        if u == v || !seen.insert((u.min(v), u.max(v))) {
            continue;
        }
        let weight = rng.gen_range(low..=high);
        edges.push(EdgeRecord::Weighted(
            NodeLabel::Int(u as i64),
            NodeLabel::Int(v as i64),
            f64::from(weight),
        ));
    }

    debug!("generated graph with {} nodes and {} edges", num_nodes, edges.len());
    GraphData {
        nodes: (0..num_nodes as i64).map(NodeLabel::Int).collect(),
        edges,
    }
}

/// Generates a `width` x `height` grid with unit-weight undirected edges
/// between horizontal and vertical neighbours. Node `y * width + x` is at (x, y).
pub fn generate_grid(width: usize, height: usize) -> GraphData {
    let index = |x: usize, y: usize| NodeLabel::Int((y * width + x) as i64);
    let mut edges = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                edges.push(EdgeRecord::Weighted(index(x, y), index(x + 1, y), 1.0));
            }
            if y + 1 < height {
                edges.push(EdgeRecord::Weighted(index(x, y), index(x, y + 1), 1.0));
            }
        }
    }

    GraphData {
        nodes: (0..(width * height) as i64).map(NodeLabel::Int).collect(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn random_graph_has_requested_unique_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_weighted_graph(20, 40, (1, 10), &mut rng);
        assert_eq!(data.nodes.len(), 20);
        assert_eq!(data.edges.len(), 40);

        let mut pairs = HashSet::new();
        for edge in &data.edges {
            match edge {
                EdgeRecord::Weighted(NodeLabel::Int(u), NodeLabel::Int(v), w) => {
                    assert_ne!(u, v);
                    assert!((1.0..=10.0).contains(w));
                    assert!(pairs.insert((*u.min(v), *u.max(v))));
                }
                other => panic!("unexpected edge {:?}", other),
            }
        }
    }

    #[test]
    fn edge_count_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = generate_weighted_graph(4, 100, (1, 1), &mut rng);
        assert_eq!(data.edges.len(), 6);
        let empty = generate_weighted_graph(1, 3, (1, 5), &mut rng);
        assert!(empty.edges.is_empty());
    }

    #[test]
    fn density_presets() {
        assert_eq!(Density::Sparse.edges_for(100), 200);
        assert_eq!(Density::Dense.edges_for(100), 4950);
        assert_eq!(Density::Middle.edges_for(100), 2575);
        // Small graphs cannot hold 2n edges
        assert_eq!(Density::Sparse.edges_for(3), 3);
        assert_eq!(Density::Middle.edges_for(1), 0);

        assert_eq!("Dense".parse::<Density>().unwrap(), Density::Dense);
        assert_eq!("m".parse::<Density>().unwrap(), Density::Middle);
        assert!("thick".parse::<Density>().is_err());
        assert_eq!(Density::Sparse.to_string(), "sparse");
    }

    #[test]
    fn grid_shape() {
        let data = generate_grid(3, 2);
        assert_eq!(data.nodes.len(), 6);
        assert_eq!(data.edges.len(), 7);
    }
}
