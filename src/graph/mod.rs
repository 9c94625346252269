pub mod directed;
pub mod generators;
pub mod io;
pub mod traits;

pub use directed::DirectedGraph;
pub use io::{EdgeRecord, GraphData, LabeledGraph, NodeLabel};
pub use traits::{is_valid_weight, Graph, MutableGraph};
