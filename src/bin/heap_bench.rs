use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use heap_sssp::benchmark::{
    combined_reports, compare_heaps, discover_datasets, first_inconsistent, run_datasets, run_once,
    write_csv, BenchmarkConfig, HeapKind, RunReport, TrackingAllocator,
};
use heap_sssp::graph::generators::{generate_weighted_graph, Density};
use heap_sssp::graph::{Graph, GraphData, LabeledGraph, NodeLabel};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[derive(Parser)]
#[command(name = "heap_bench")]
#[command(about = "Compare priority queues under Dijkstra's algorithm", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random weighted undirected graph
    Generate {
        /// Number of nodes
        #[arg(long)]
        nodes: usize,

        /// Number of distinct edges
        #[arg(long, required_unless_present = "density", conflicts_with = "density")]
        edges: Option<usize>,

        /// Edge-count preset: sparse (2n), dense (n(n-1)/2) or middle
        #[arg(long)]
        density: Option<Density>,

        /// Smallest edge weight
        #[arg(long, default_value_t = 1)]
        min_weight: u32,

        /// Largest edge weight
        #[arg(long, default_value_t = 100)]
        max_weight: u32,

        /// Seed for reproducible graphs
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file
        #[arg(long)]
        out: PathBuf,
    },
    /// Time every selected queue on one graph
    Run {
        /// Graph JSON file
        #[arg(long)]
        graph: PathBuf,

        #[command(flatten)]
        bench: BenchArgs,
    },
    /// Time every selected queue on each graph file in a directory
    Datasets {
        /// Directory of graph JSON files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[command(flatten)]
        bench: BenchArgs,
    },
    /// Print the distance to every node
    Shortest {
        /// Graph JSON file
        #[arg(long)]
        graph: PathBuf,

        /// Source node label
        #[arg(long)]
        source: String,

        /// Queue to use
        #[arg(long, default_value = "binary")]
        heap: HeapKind,
    },
}

#[derive(Args)]
struct BenchArgs {
    /// Source node label
    #[arg(long)]
    source: Option<String>,

    /// Queue to run (binary, d-ary, d-ary:N, radix, fibonacci, lazy); repeatable
    #[arg(long = "heap")]
    heaps: Vec<HeapKind>,

    /// Write one CSV row per run
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Benchmark config JSON file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runs per queue
    #[arg(long)]
    repeat: Option<usize>,

    /// Run the queues of each repetition in parallel (disables memory tracking)
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl BenchArgs {
    fn into_config(self) -> Result<BenchmarkConfig> {
        let mut settings = match self.config {
            Some(path) => BenchmarkConfig::from_json_file(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => BenchmarkConfig::new(),
        };
        if !self.heaps.is_empty() {
            settings = settings.with_heaps(self.heaps);
        }
        if let Some(source) = self.source {
            settings = settings.with_source(NodeLabel::from(source.as_str()));
        }
        if let Some(path) = self.csv {
            settings = settings.with_csv_path(path);
        }
        if let Some(repeat) = self.repeat {
            settings = settings.with_repetitions(repeat);
        }
        if self.parallel {
            settings = settings.with_parallel(true);
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            nodes,
            edges,
            density,
            min_weight,
            max_weight,
            seed,
            out,
        } => {
            let edges = match (edges, density) {
                (Some(edges), _) => edges,
                (None, Some(density)) => density.edges_for(nodes),
                (None, None) => bail!("either --edges or --density is required"),
            };
            generate(nodes, edges, (min_weight, max_weight), seed, &out)
        }
        Commands::Run { graph, bench } => run(&graph, &bench.into_config()?),
        Commands::Datasets { data_dir, bench } => datasets(&data_dir, &bench.into_config()?),
        Commands::Shortest {
            graph,
            source,
            heap,
        } => shortest(&graph, &NodeLabel::from(source.as_str()), heap),
    }
}

fn generate(
    nodes: usize,
    edges: usize,
    weights: (u32, u32),
    seed: Option<u64>,
    out: &Path,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data = generate_weighted_graph(nodes, edges, weights, &mut rng);
    data.save_json(out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "{} {} nodes, {} edges -> {}",
        "Generated".green().bold(),
        data.nodes.len(),
        data.edges.len(),
        out.display()
    );
    Ok(())
}

fn load(path: &Path) -> Result<LabeledGraph> {
    let data = GraphData::load_json(path)
        .with_context(|| format!("failed to load graph {}", path.display()))?;
    let graph = data
        .to_graph()
        .with_context(|| format!("invalid graph in {}", path.display()))?;
    Ok(graph)
}

fn resolve_source(graph: &LabeledGraph, source: Option<&NodeLabel>) -> Result<usize> {
    match source {
        Some(label) => Ok(graph.index_of(label)?),
        None if graph.labels().is_empty() => bail!("graph has no nodes"),
        None => Ok(0),
    }
}

fn run(path: &Path, config: &BenchmarkConfig) -> Result<()> {
    let labeled = load(path)?;
    let source = resolve_source(&labeled, config.source.as_ref())?;
    let graph = &labeled.graph;

    println!("=====================================================");
    println!(
        "Dijkstra from {} on {} vertices, {} edges",
        node_label(&labeled, source),
        graph.vertex_count(),
        graph.edge_count()
    );
    println!("=====================================================");

    let comparison = compare_heaps(graph, source, config)?;
    print_table(&comparison.reports);

    match &comparison.mismatch {
        None => println!("{}", "All queues agree on every distance".green()),
        Some(m) => println!(
            "{}",
            format!(
                "Mismatch at node {}: {} found {}, {} found {}",
                node_label(&labeled, m.vertex),
                m.reference,
                m.expected,
                m.other,
                m.found
            )
            .red()
            .bold()
        ),
    }

    if let Some(csv_path) = &config.csv_path {
        write_csv(csv_path, &comparison.reports)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        println!("Wrote {} rows to {}", comparison.reports.len(), csv_path.display());
    }

    if !comparison.is_consistent() {
        bail!("queues disagree on shortest distances");
    }
    Ok(())
}

fn datasets(dir: &Path, config: &BenchmarkConfig) -> Result<()> {
    let found = discover_datasets(dir)
        .with_context(|| format!("failed to scan {}", dir.display()))?;
    if found.is_empty() {
        bail!("no graph files in {}; generate some first", dir.display());
    }

    let results = run_datasets(&found, config)?;
    for result in &results {
        println!("=====================================================");
        println!(
            "{}: {} vertices, {} edges",
            result.dataset.name.bold(),
            result.comparison.reports.first().map_or(0, |r| r.vertices),
            result.comparison.reports.first().map_or(0, |r| r.edges)
        );
        println!("=====================================================");
        print_table(&result.comparison.reports);
    }

    let reports = combined_reports(&results);
    if let Some(csv_path) = &config.csv_path {
        write_csv(csv_path, &reports)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        println!("Wrote {} rows to {}", reports.len(), csv_path.display());
    }

    if let Some(bad) = first_inconsistent(&results) {
        bail!("queues disagree on shortest distances in {}", bad.dataset.name);
    }
    println!("{}", "All queues agree on every dataset".green());
    Ok(())
}

fn print_table(reports: &[RunReport]) {
    let fastest = reports
        .iter()
        .map(|r| r.elapsed)
        .min()
        .unwrap_or_default();

    println!(
        "{:<12} | {:<4} | {:<12} | {:<10} | {:<10} | {:<10} | {:<8} | {:<12}",
        "Heap", "Rep", "Time (ms)", "Pops", "Stale", "Dec-key", "Peak", "Memory (B)"
    );
    println!("{}", "-".repeat(99));
    for report in reports {
        let millis = format!("{:.3}", report.elapsed.as_secs_f64() * 1000.0);
        let millis = if report.elapsed == fastest {
            millis.green().bold()
        } else {
            millis.normal()
        };
        let memory = report
            .peak_memory_bytes
            .map_or_else(|| "-".to_string(), |bytes| bytes.to_string());
        println!(
            "{:<12} | {:<4} | {:<12} | {:<10} | {:<10} | {:<10} | {:<8} | {:<12}",
            report.heap.to_string().cyan(),
            report.repetition,
            millis,
            report.stats.pops,
            report.stats.stale_entries,
            report.stats.decrease_keys,
            report.peak_queue_len,
            memory
        );
    }
}

fn shortest(path: &Path, source: &NodeLabel, heap: HeapKind) -> Result<()> {
    let labeled = load(path)?;
    let source = resolve_source(&labeled, Some(source))?;
    let (report, result) = run_once(&labeled.graph, source, heap)?;

    println!(
        "Shortest distances from {} ({}, {:.3} ms):",
        node_label(&labeled, source),
        heap,
        report.elapsed.as_secs_f64() * 1000.0
    );
    for (label, distance) in labeled.labeled_distances(&result) {
        if distance.is_finite() {
            println!("  {}: {}", label, distance);
        } else {
            println!("  {}: {}", label, "unreachable".yellow());
        }
    }
    Ok(())
}

fn node_label(graph: &LabeledGraph, vertex: usize) -> String {
    graph
        .label(vertex)
        .map(|l| l.to_string())
        .unwrap_or_else(|| vertex.to_string())
}
