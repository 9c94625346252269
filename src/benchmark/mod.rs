//! Benchmark harness: runs the shortest-path engine once per queue
//! implementation on the same graph, times each run and checks that every
//! queue produced the same distances.
//!
//! The harness only observes. Each run builds its own queue and distance
//! table, so runs can execute side by side on the rayon pool while sharing
//! nothing but the read-only graph.

pub mod config;
pub mod datasets;
pub mod instrumented;
pub mod memory;
pub mod report;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::{dijkstra, ShortestPathResult};
use crate::data_structures::{BinaryHeap, DHeap, FibonacciHeap, LazyHeap, PriorityQueue, RadixHeap};
use crate::graph::Graph;
use crate::{Error, Result, Weight};

pub use config::BenchmarkConfig;
pub use datasets::{
    combined_reports, discover_datasets, first_inconsistent, run_datasets, Dataset, DatasetComparison,
};
pub use instrumented::Instrumented;
pub use memory::TrackingAllocator;
pub use report::{write_csv, write_csv_to, RunReport};

/// Relative tolerance when comparing distances from different queues
pub const DISTANCE_TOLERANCE: f64 = 1e-9;

/// Selects one queue implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeapKind {
    Binary,
    /// d-ary heap with a fixed branching factor
    DAry(usize),
    /// d-ary heap with the branching factor taken from graph density
    DAryAuto,
    Radix,
    Fibonacci,
    /// `std` binary heap without decrease-key
    Lazy,
}

impl HeapKind {
    /// The four decrease-key queues, in report order
    pub const ALL: [HeapKind; 4] = [
        HeapKind::Radix,
        HeapKind::Binary,
        HeapKind::DAryAuto,
        HeapKind::Fibonacci,
    ];

    /// Builds an empty queue of this kind sized for `graph`
    pub fn build<G: Graph<Weight>>(&self, graph: &G) -> Box<dyn PriorityQueue<usize, Weight>> {
        let n = graph.vertex_count();
        match *self {
            HeapKind::Binary => Box::new(BinaryHeap::with_capacity(n)),
            HeapKind::DAry(d) => Box::new(DHeap::with_capacity(d, n)),
            HeapKind::DAryAuto => Box::new(DHeap::for_graph(n, graph.edge_count())),
            HeapKind::Radix => Box::new(RadixHeap::new()),
            HeapKind::Fibonacci => Box::new(FibonacciHeap::new()),
            HeapKind::Lazy => Box::new(LazyHeap::with_capacity(n)),
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapKind::Binary => write!(f, "binary"),
            HeapKind::DAry(d) => write!(f, "d-ary:{}", d),
            HeapKind::DAryAuto => write!(f, "d-ary"),
            HeapKind::Radix => write!(f, "radix"),
            HeapKind::Fibonacci => write!(f, "fibonacci"),
            HeapKind::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for HeapKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        let kind = match s.as_str() {
            "binary" | "bin" => HeapKind::Binary,
            "d-ary" | "dary" | "d" => HeapKind::DAryAuto,
            "radix" => HeapKind::Radix,
            "fibonacci" | "fib" => HeapKind::Fibonacci,
            "lazy" => HeapKind::Lazy,
            other => {
                let arity = other
                    .strip_prefix("d-ary:")
                    .or_else(|| other.strip_prefix("dary:"))
                    .and_then(|d| d.parse::<usize>().ok())
                    .filter(|d| *d >= 2)
                    .ok_or_else(|| Error::InvalidConfig(format!("unknown heap kind '{}'", s)))?;
                HeapKind::DAry(arity)
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for HeapKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HeapKind> for String {
    fn from(kind: HeapKind) -> Self {
        kind.to_string()
    }
}

/// First vertex on which two runs disagree
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub vertex: usize,
    pub reference: HeapKind,
    pub other: HeapKind,
    pub expected: f64,
    pub found: f64,
}

/// Reports of all runs plus the outcome of the equivalence check
#[derive(Debug, Clone)]
pub struct Comparison {
    pub reports: Vec<RunReport>,
    pub mismatch: Option<Mismatch>,
}

impl Comparison {
    /// True when every queue produced the same distance table
    pub fn is_consistent(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Runs Dijkstra from `source` with a fresh queue of `kind`
///
/// The report is numbered as repetition 0. Peak memory is measured when a
/// [`TrackingAllocator`] is installed.
pub fn run_once<G>(
    graph: &G,
    source: usize,
    kind: HeapKind,
) -> Result<(RunReport, ShortestPathResult<Weight>)>
where
    G: Graph<Weight>,
{
    run_numbered(graph, source, kind, 0, true)
}

fn run_numbered<G: Graph<Weight>>(
    graph: &G,
    source: usize,
    kind: HeapKind,
    repetition: usize,
    track_memory: bool,
) -> Result<(RunReport, ShortestPathResult<Weight>)> {
    let timed_run = || -> Result<_> {
        let mut queue = Instrumented::new(kind.build(graph));
        let start = Instant::now();
        let result = dijkstra::<Weight, G, _>(graph, source, &mut queue)?;
        Ok((result, start.elapsed(), queue.peak_len()))
    };
    let (outcome, peak_memory_bytes) = if track_memory {
        memory::measure_peak(timed_run)
    } else {
        (timed_run(), None)
    };
    let (result, elapsed, peak_queue_len) = outcome?;

    debug!("{} finished in {:?}", kind, elapsed);
    let report = RunReport {
        graph: None,
        heap: kind,
        repetition,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        elapsed,
        peak_queue_len,
        peak_memory_bytes,
        stats: result.stats,
        reachable: result.reachable_count(),
    };
    Ok((report, result))
}

fn distances_match(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= DISTANCE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Compares every distance table against the first one
pub fn check_equivalence(runs: &[(HeapKind, &ShortestPathResult<Weight>)]) -> Option<Mismatch> {
    let (reference, expected) = runs.first()?;
    for (other, result) in &runs[1..] {
        for (vertex, (a, b)) in expected.distances.iter().zip(&result.distances).enumerate() {
            if !distances_match(a.into_inner(), b.into_inner()) {
                return Some(Mismatch {
                    vertex,
                    reference: *reference,
                    other: *other,
                    expected: a.into_inner(),
                    found: b.into_inner(),
                });
            }
        }
    }
    None
}

/// Runs every configured queue on `graph` and checks they agree
///
/// Peak memory is left unmeasured when the queues run in parallel.
pub fn compare_heaps<G>(graph: &G, source: usize, config: &BenchmarkConfig) -> Result<Comparison>
where
    G: Graph<Weight> + Sync,
{
    config.validate()?;

    let mut reports = Vec::with_capacity(config.heaps.len() * config.repetitions);
    let mut mismatch = None;

    for repetition in 0..config.repetitions {
        let runs: Vec<(RunReport, ShortestPathResult<Weight>)> = if config.parallel {
            config
                .heaps
                .par_iter()
                .map(|kind| run_numbered(graph, source, *kind, repetition, false))
                .collect::<Result<_>>()?
        } else {
            config
                .heaps
                .iter()
                .map(|kind| run_numbered(graph, source, *kind, repetition, true))
                .collect::<Result<_>>()?
        };

        if mismatch.is_none() {
            let tables: Vec<_> = runs.iter().map(|(report, result)| (report.heap, result)).collect();
            mismatch = check_equivalence(&tables);
            if let Some(m) = &mismatch {
                warn!(
                    "{} and {} disagree at vertex {}: {} vs {}",
                    m.reference, m.other, m.vertex, m.expected, m.found
                );
            }
        }
        reports.extend(runs.into_iter().map(|(report, _)| report));
    }

    Ok(Comparison { reports, mismatch })
}
