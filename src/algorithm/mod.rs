pub mod traits;
pub mod dijkstra;

pub use dijkstra::dijkstra;
pub use traits::{SearchStats, ShortestPathAlgorithm, ShortestPathResult};
