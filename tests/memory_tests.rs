use heap_sssp::benchmark::memory::{is_tracking, live_bytes, measure_peak};
use heap_sssp::benchmark::{compare_heaps, run_once, write_csv_to, BenchmarkConfig, HeapKind, TrackingAllocator};
use heap_sssp::graph::generators::generate_weighted_graph;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

// One test only: the counters are process-wide and concurrent tests would
// blur each other's windows.
#[test]
fn test_runs_report_peak_heap_bytes() {
    let (buffer, peak) = measure_peak(|| vec![1u64; 1 << 16]);
    assert!(is_tracking());
    assert!(peak.unwrap() >= buffer.len() * std::mem::size_of::<u64>());
    assert!(live_bytes() >= buffer.len() * std::mem::size_of::<u64>());
    drop(buffer);

    let labeled = generate_weighted_graph(500, 2000, (1, 50), &mut StdRng::seed_from_u64(12))
        .to_graph()
        .unwrap();

    // Distances alone take one f64 per vertex.
    for kind in [HeapKind::Binary, HeapKind::Radix, HeapKind::Fibonacci] {
        let (report, _) = run_once(&labeled.graph, 0, kind).unwrap();
        let bytes = report.peak_memory_bytes.unwrap();
        assert!(bytes >= 500 * std::mem::size_of::<f64>(), "{} used {} bytes", kind, bytes);
    }

    let sequential = compare_heaps(&labeled.graph, 0, &BenchmarkConfig::new()).unwrap();
    assert!(sequential.reports.iter().all(|r| r.peak_memory_bytes.is_some()));

    let parallel = compare_heaps(&labeled.graph, 0, &BenchmarkConfig::new().with_parallel(true)).unwrap();
    assert!(parallel.reports.iter().all(|r| r.peak_memory_bytes.is_none()));

    let mut csv = Vec::new();
    write_csv_to(&mut csv, &sequential.reports).unwrap();
    let text = String::from_utf8(csv).unwrap();
    let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
    assert_eq!(row[7], sequential.reports[0].peak_memory_bytes.unwrap().to_string());
}
