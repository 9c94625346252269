//! JSON graph files.
//!
//! The on-disk format is `{ "nodes": [...], "edges": [...] }`. Node labels are
//! integers or strings. An edge `[u, v, w]` is undirected and is added in both
//! directions; an edge `[u, v]` is directed with weight 1.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{debug, warn};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::algorithm::ShortestPathResult;
use crate::graph::directed::DirectedGraph;
use crate::graph::traits::{is_valid_weight, MutableGraph};
use crate::{Error, Result, Weight};

/// A node identifier as it appears in a graph file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeLabel {
    Int(i64),
    Name(String),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Int(id) => write!(f, "{}", id),
            NodeLabel::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for NodeLabel {
    fn from(id: i64) -> Self {
        NodeLabel::Int(id)
    }
}

impl From<&str> for NodeLabel {
    /// Integer-looking text becomes an integer label
    fn from(text: &str) -> Self {
        match text.trim().parse::<i64>() {
            Ok(id) => NodeLabel::Int(id),
            Err(_) => NodeLabel::Name(text.to_string()),
        }
    }
}

/// One entry of the `edges` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeRecord {
    /// `[u, v, weight]`, undirected
    Weighted(NodeLabel, NodeLabel, f64),
    /// `[u, v]`, directed with weight 1
    Unweighted(NodeLabel, NodeLabel),
}

/// Serialized form of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeLabel>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphData {
    /// Parses a graph from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a graph from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let data: GraphData = serde_json::from_reader(reader)?;
        debug!(
            "loaded {} nodes and {} edges from {}",
            data.nodes.len(),
            data.edges.len(),
            path.as_ref().display()
        );
        Ok(data)
    }

    /// Writes the graph to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(writer, self)?;
        debug!("saved graph to {}", path.as_ref().display());
        Ok(())
    }

    /// Builds the adjacency structure, mapping labels to dense vertex ids
    pub fn to_graph(&self) -> Result<LabeledGraph> {
        let mut labels = Vec::with_capacity(self.nodes.len());
        let mut index = HashMap::with_capacity(self.nodes.len());
        for label in &self.nodes {
            if index.contains_key(label) {
                warn!("duplicate node label {} ignored", label);
                continue;
            }
            index.insert(label.clone(), labels.len());
            labels.push(label.clone());
        }

        let lookup = |label: &NodeLabel| -> Result<usize> {
            index
                .get(label)
                .copied()
                .ok_or_else(|| Error::UnknownNode(label.to_string()))
        };

        let mut graph = DirectedGraph::with_capacity(labels.len());
        for edge in &self.edges {
            match edge {
                EdgeRecord::Weighted(u, v, weight) => {
                    let (u, v) = (lookup(u)?, lookup(v)?);
                    if !is_valid_weight(*weight) {
                        return Err(Error::NegativeWeight(*weight));
                    }
                    graph.add_undirected_edge(u, v, OrderedFloat(*weight));
                }
                EdgeRecord::Unweighted(u, v) => {
                    let (u, v) = (lookup(u)?, lookup(v)?);
                    graph.add_edge(u, v, OrderedFloat(1.0));
                }
            }
        }

        Ok(LabeledGraph {
            graph,
            labels,
            index,
        })
    }
}

/// A graph together with the mapping between file labels and vertex ids
#[derive(Debug, Clone)]
pub struct LabeledGraph {
    pub graph: DirectedGraph<Weight>,
    labels: Vec<NodeLabel>,
    index: HashMap<NodeLabel, usize>,
}

impl LabeledGraph {
    /// Vertex id of a label
    pub fn index_of(&self, label: &NodeLabel) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownNode(label.to_string()))
    }

    /// Label of a vertex id
    pub fn label(&self, vertex: usize) -> Option<&NodeLabel> {
        self.labels.get(vertex)
    }

    /// All labels in vertex order
    pub fn labels(&self) -> &[NodeLabel] {
        &self.labels
    }

    /// Distances keyed by label, in vertex order; unreachable nodes are `+inf`
    pub fn labeled_distances(&self, result: &ShortestPathResult<Weight>) -> Vec<(NodeLabel, f64)> {
        self.labels
            .iter()
            .cloned()
            .zip(result.distances.iter().map(|d| d.into_inner()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_edges() {
        let data = GraphData::from_json_str(
            r#"{"nodes": [0, 1, "depot"], "edges": [[0, 1, 2.5], [1, "depot"]]}"#,
        )
        .unwrap();
        assert_eq!(data.nodes[2], NodeLabel::Name("depot".to_string()));
        assert_eq!(
            data.edges[0],
            EdgeRecord::Weighted(NodeLabel::Int(0), NodeLabel::Int(1), 2.5)
        );
        assert_eq!(
            data.edges[1],
            EdgeRecord::Unweighted(NodeLabel::Int(1), NodeLabel::Name("depot".to_string()))
        );
    }

    #[test]
    fn label_from_text() {
        assert_eq!(NodeLabel::from("42"), NodeLabel::Int(42));
        assert_eq!(NodeLabel::from("a"), NodeLabel::Name("a".to_string()));
    }
}
