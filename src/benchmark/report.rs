use std::io;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::algorithm::SearchStats;
use crate::benchmark::HeapKind;
use crate::Result;

/// Measurements of one shortest-path run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Dataset the run belongs to, for batch runs over a data directory
    pub graph: Option<String>,
    pub heap: HeapKind,
    pub repetition: usize,
    pub vertices: usize,
    pub edges: usize,
    pub elapsed: Duration,
    /// Largest number of entries the queue held at once
    pub peak_queue_len: usize,
    /// Peak heap bytes allocated during the run, when a
    /// [`TrackingAllocator`](crate::benchmark::TrackingAllocator) is installed
    /// and the run was not sharing the process with other runs
    pub peak_memory_bytes: Option<usize>,
    pub stats: SearchStats,
    /// Vertices reached from the source
    pub reachable: usize,
}

#[derive(Debug, Serialize)]
struct CsvRow {
    graph: String,
    heap: String,
    repetition: usize,
    vertices: usize,
    edges: usize,
    elapsed_secs: f64,
    peak_queue_len: usize,
    peak_memory_bytes: Option<usize>,
    pops: usize,
    stale_entries: usize,
    pushes: usize,
    decrease_keys: usize,
    relaxations: usize,
    reachable: usize,
}

impl From<&RunReport> for CsvRow {
    fn from(report: &RunReport) -> Self {
        CsvRow {
            graph: report.graph.clone().unwrap_or_default(),
            heap: report.heap.to_string(),
            repetition: report.repetition,
            vertices: report.vertices,
            edges: report.edges,
            elapsed_secs: report.elapsed.as_secs_f64(),
            peak_queue_len: report.peak_queue_len,
            peak_memory_bytes: report.peak_memory_bytes,
            pops: report.stats.pops,
            stale_entries: report.stats.stale_entries,
            pushes: report.stats.pushes,
            decrease_keys: report.stats.decrease_keys,
            relaxations: report.stats.relaxations,
            reachable: report.reachable,
        }
    }
}

/// Writes one CSV row per report, with a header, to `writer`
pub fn write_csv_to<W: io::Write>(writer: W, reports: &[RunReport]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for report in reports {
        csv.serialize(CsvRow::from(report))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the reports to a CSV file at `path`
pub fn write_csv<P: AsRef<Path>>(path: P, reports: &[RunReport]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv_to(file, reports)?;
    debug!("wrote {} rows to {}", reports.len(), path.as_ref().display());
    Ok(())
}
