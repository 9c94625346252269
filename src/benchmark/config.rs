use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::benchmark::HeapKind;
use crate::graph::NodeLabel;
use crate::{Error, Result};

/// Settings for a benchmark run
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "heaps": ["binary", "d-ary:4", "radix"], "repetitions": 3, "parallel": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Queue implementations to run, in report order
    pub heaps: Vec<HeapKind>,
    /// How many times each queue runs on the graph
    pub repetitions: usize,
    /// Source node; the first node of the graph when absent
    pub source: Option<NodeLabel>,
    /// Run the queues of one repetition on the rayon pool
    pub parallel: bool,
    /// Where to write the CSV report, if anywhere
    pub csv_path: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            heaps: HeapKind::ALL.to_vec(),
            repetitions: 1,
            source: None,
            parallel: false,
            csv_path: None,
        }
    }
}

impl BenchmarkConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: BenchmarkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the queue implementations to run
    pub fn with_heaps(mut self, heaps: Vec<HeapKind>) -> Self {
        self.heaps = heaps;
        self
    }

    /// Set the number of repetitions
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the source node
    pub fn with_source(mut self, source: NodeLabel) -> Self {
        self.source = Some(source);
        self
    }

    /// Enable or disable running the queues in parallel
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the CSV output path
    pub fn with_csv_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    /// Checks that the config describes at least one run
    pub fn validate(&self) -> Result<()> {
        if self.heaps.is_empty() {
            return Err(Error::InvalidConfig("no heaps selected".to_string()));
        }
        if self.repetitions == 0 {
            return Err(Error::InvalidConfig("repetitions must be at least 1".to_string()));
        }
        Ok(())
    }
}
