//! Heap SSSP - pluggable priority queues for single-source shortest paths
//!
//! This library provides four interchangeable min-priority queues with
//! decrease-key support (binary heap, d-ary heap, radix heap and Fibonacci heap)
//! and a Dijkstra engine that runs unmodified over any of them through the
//! [`PriorityQueue`] trait.
//!
//! Around that core sit a small graph layer (adjacency lists, JSON graph files,
//! random generators) and a benchmark harness that times each queue on the
//! same graph and checks that they all agree on the distances.

pub mod algorithm;
pub mod benchmark;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    dijkstra::Dijkstra, SearchStats, ShortestPathAlgorithm, ShortestPathResult,
};
pub use data_structures::{
    BinaryHeap, DHeap, FibonacciHeap, LazyHeap, PriorityQueue, RadixHeap,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Edge weight / distance type used by the graph files and the benchmark harness
pub type Weight = ordered_float::OrderedFloat<f64>;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Pop from empty queue")]
    EmptyQueue,

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Unknown node label: {0}")]
    UnknownNode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
