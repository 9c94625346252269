//! Property-based tests using proptest
//!
//! Random operation sequences are replayed against every queue and checked
//! against a plain map model; random graphs are solved with every queue and
//! the distance tables compared.

use proptest::prelude::*;
use std::collections::HashMap;

use heap_sssp::algorithm::dijkstra;
use heap_sssp::benchmark::{compare_heaps, BenchmarkConfig, HeapKind};
use heap_sssp::data_structures::{
    BinaryHeap, DHeap, FibonacciHeap, LazyHeap, PriorityQueue, RadixHeap,
};
use heap_sssp::graph::DirectedGraph;
use heap_sssp::Weight;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
enum Op {
    /// Push `value` at `last popped + delta`
    Push(usize, u32),
    Pop,
    /// Decrease `value` to `last popped + delta`
    Decrease(usize, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..24, 0u32..500).prop_map(|(v, d)| Op::Push(v, d)),
        2 => Just(Op::Pop),
        2 => (0usize..24, 0u32..500).prop_map(|(v, d)| Op::Decrease(v, d)),
    ]
}

/// Replays `ops` and checks every answer against a value -> priority map
fn check_against_model<Q: PriorityQueue<usize, u32>>(mut queue: Q, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut model: HashMap<usize, u32> = HashMap::new();
    let mut last = 0u32;

    for op in ops {
        match op {
            Op::Push(value, delta) => {
                let priority = last + delta;
                queue.push(priority, value).unwrap();
                let entry = model.entry(value).or_insert(priority);
                *entry = (*entry).min(priority);
            }
            Op::Pop => {
                if model.is_empty() {
                    prop_assert!(queue.pop().is_err());
                    continue;
                }
                let expected = *model.values().min().unwrap();
                let (value, priority) = queue.pop().unwrap();
                prop_assert_eq!(priority, expected);
                prop_assert!(priority >= last);
                prop_assert_eq!(model.remove(&value), Some(priority));
                last = priority;
            }
            Op::Decrease(value, delta) => {
                let priority = last + delta;
                let lowered = queue.decrease_key(value, priority).unwrap();
                let expected = matches!(model.get(&value), Some(&current) if priority < current);
                prop_assert_eq!(lowered, expected);
                if lowered {
                    model.insert(value, priority);
                }
            }
        }

        prop_assert_eq!(queue.len(), model.len());
        prop_assert_eq!(queue.peek().map(|(_, p)| p), model.values().min().copied());
    }
    Ok(())
}

/// Pops everything and checks the sequence is sorted
fn check_pop_order<Q: PriorityQueue<usize, u32>>(mut queue: Q, priorities: Vec<u32>) -> Result<(), TestCaseError> {
    for (value, &priority) in priorities.iter().enumerate() {
        queue.push(priority, value).unwrap();
    }
    let mut popped = Vec::with_capacity(priorities.len());
    while let Ok((_, priority)) = queue.pop() {
        popped.push(priority);
    }
    let mut expected = priorities;
    expected.sort_unstable();
    prop_assert_eq!(popped, expected);
    Ok(())
}

/// Radix heap that logs every pop together with the floor it left behind
struct PopLog {
    heap: RadixHeap<usize, Weight>,
    popped: Vec<(Weight, Weight)>,
}

impl PriorityQueue<usize, Weight> for PopLog {
    fn name(&self) -> &'static str {
        "PopLog"
    }

    fn push(&mut self, priority: Weight, value: usize) -> heap_sssp::Result<()> {
        self.heap.push(priority, value)
    }

    fn pop(&mut self) -> heap_sssp::Result<(usize, Weight)> {
        let (value, priority) = self.heap.pop()?;
        self.popped.push((priority, self.heap.last_popped()));
        Ok((value, priority))
    }

    fn peek(&self) -> Option<(usize, Weight)> {
        self.heap.peek()
    }

    fn decrease_key(&mut self, value: usize, new_priority: Weight) -> heap_sssp::Result<bool> {
        self.heap.decrease_key(value, new_priority)
    }

    fn contains(&self, value: &usize) -> bool {
        self.heap.contains(value)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (1usize..40).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0u32..100), 0..(n * 4)),
        )
    })
}

proptest! {
    #[test]
    fn binary_heap_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model(BinaryHeap::new(), ops)?;
    }

    #[test]
    fn d_heap_matches_model(d in 2usize..7, ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model(DHeap::new(d), ops)?;
    }

    #[test]
    fn radix_heap_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model(RadixHeap::new(), ops)?;
    }

    #[test]
    fn fibonacci_heap_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model(FibonacciHeap::new(), ops)?;
    }

    #[test]
    fn every_queue_pops_sorted(priorities in prop::collection::vec(0u32..10_000, 0..150)) {
        check_pop_order(BinaryHeap::new(), priorities.clone())?;
        check_pop_order(DHeap::new(4), priorities.clone())?;
        check_pop_order(RadixHeap::new(), priorities.clone())?;
        check_pop_order(FibonacciHeap::new(), priorities.clone())?;
        check_pop_order(LazyHeap::new(), priorities)?;
    }

    #[test]
    fn radix_floor_follows_pops(priorities in prop::collection::vec(0u32..1_000_000, 1..100)) {
        let mut heap: RadixHeap<usize, u32> = RadixHeap::new();
        for (value, &priority) in priorities.iter().enumerate() {
            heap.push(priority, value).unwrap();
        }
        let mut previous = 0;
        while let Ok((_, priority)) = heap.pop() {
            prop_assert!(priority >= previous);
            prop_assert_eq!(heap.last_popped(), priority);
            previous = priority;
        }
    }

    #[test]
    fn radix_pops_never_go_backwards_inside_dijkstra((n, edges) in graph_strategy(), fractional in any::<bool>()) {
        let scale = if fractional { 0.25 } else { 1.0 };
        let graph: DirectedGraph<Weight> = DirectedGraph::from_undirected_edges(
            n,
            edges.into_iter().map(|(u, v, w)| (u, v, OrderedFloat(f64::from(w) * scale))),
        )
        .unwrap();

        let mut queue = PopLog { heap: RadixHeap::new(), popped: Vec::new() };
        let result = dijkstra(&graph, 0, &mut queue).unwrap();

        prop_assert_eq!(queue.popped.len(), result.stats.pops);
        let mut previous = OrderedFloat(0.0);
        for &(priority, floor) in &queue.popped {
            prop_assert!(priority >= previous);
            prop_assert_eq!(floor, priority);
            previous = priority;
        }
        let settled = queue.popped.iter().filter(|(p, _)| p.is_finite()).count();
        prop_assert_eq!(settled, result.reachable_count());
    }

    #[test]
    fn fibonacci_roots_have_distinct_degrees_after_pop(
        priorities in prop::collection::vec(0u32..1000, 2..120),
        decreases in prop::collection::vec((0usize..120, 0u32..1000), 0..40),
    ) {
        let mut heap = FibonacciHeap::new();
        for (value, &priority) in priorities.iter().enumerate() {
            heap.push(priority, value).unwrap();
        }
        heap.pop().unwrap();
        for (value, priority) in decreases {
            heap.decrease_key(value, priority).unwrap();
        }
        if heap.len() > 1 {
            heap.pop().unwrap();
            let mut degrees = heap.root_degrees();
            let roots = degrees.len();
            degrees.sort_unstable();
            degrees.dedup();
            prop_assert_eq!(degrees.len(), roots);
        }
    }

    #[test]
    fn all_queues_agree_on_random_graphs((n, edges) in graph_strategy(), parallel in any::<bool>()) {
        let graph: DirectedGraph<Weight> = DirectedGraph::from_undirected_edges(
            n,
            edges.into_iter().map(|(u, v, w)| (u, v, OrderedFloat(f64::from(w)))),
        )
        .unwrap();

        let config = BenchmarkConfig::new()
            .with_heaps(vec![
                HeapKind::Binary,
                HeapKind::DAry(3),
                HeapKind::DAryAuto,
                HeapKind::Radix,
                HeapKind::Fibonacci,
                HeapKind::Lazy,
            ])
            .with_parallel(parallel);
        let comparison = compare_heaps(&graph, 0, &config).unwrap();
        prop_assert!(comparison.mismatch.is_none(), "{:?}", comparison.mismatch);

        let reachable: Vec<usize> = comparison.reports.iter().map(|r| r.reachable).collect();
        prop_assert!(reachable.iter().all(|&r| r == reachable[0] && r >= 1));
    }
}
