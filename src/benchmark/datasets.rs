//! Batch comparisons over a directory of graph files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::benchmark::{compare_heaps, BenchmarkConfig, Comparison, RunReport};
use crate::graph::GraphData;
use crate::Result;

/// A graph file found in a data directory
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// File name without the `.json` extension
    pub name: String,
    pub path: PathBuf,
    /// Number of nodes listed in the file
    pub nodes: usize,
}

/// Outcome of comparing the queues on one dataset
#[derive(Debug, Clone)]
pub struct DatasetComparison {
    pub dataset: Dataset,
    pub comparison: Comparison,
}

/// Lists every `.json` graph in `dir`, smallest graph first
///
/// Files with equal node counts are ordered by name.
pub fn discover_datasets<P: AsRef<Path>>(dir: P) -> Result<Vec<Dataset>> {
    let mut datasets = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let data = GraphData::load_json(&path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        datasets.push(Dataset {
            name,
            path,
            nodes: data.nodes.len(),
        });
    }

    if datasets.is_empty() {
        warn!("no graph files in {}", dir.as_ref().display());
    }
    datasets.sort_by(|a, b| a.nodes.cmp(&b.nodes).then_with(|| a.name.cmp(&b.name)));
    Ok(datasets)
}

/// Compares the configured queues on each dataset in turn
///
/// The source is `config.source` when set and the first node of each graph
/// otherwise. Every report is tagged with its dataset name.
pub fn run_datasets(datasets: &[Dataset], config: &BenchmarkConfig) -> Result<Vec<DatasetComparison>> {
    config.validate()?;

    let mut results = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let labeled = GraphData::load_json(&dataset.path)?.to_graph()?;
        let source = match &config.source {
            Some(label) => labeled.index_of(label)?,
            None if labeled.labels().is_empty() => {
                warn!("skipping {}: graph has no nodes", dataset.name);
                continue;
            }
            None => 0,
        };

        info!("comparing queues on {} ({} nodes)", dataset.name, dataset.nodes);
        let mut comparison = compare_heaps(&labeled.graph, source, config)?;
        for report in &mut comparison.reports {
            report.graph = Some(dataset.name.clone());
        }
        results.push(DatasetComparison {
            dataset: dataset.clone(),
            comparison,
        });
    }
    Ok(results)
}

/// All reports of a batch, in dataset order
pub fn combined_reports(results: &[DatasetComparison]) -> Vec<RunReport> {
    results
        .iter()
        .flat_map(|r| r.comparison.reports.iter().cloned())
        .collect()
}

/// First dataset whose queues disagreed, if any
pub fn first_inconsistent(results: &[DatasetComparison]) -> Option<&DatasetComparison> {
    results.iter().find(|r| !r.comparison.is_consistent())
}
