use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use route_search::algorithms::Algorithm;
use route_search::algorithms::SearchConfig;
use route_search::algorithms::search;
use route_search::generators::random_geometric_graph;
use route_search::graph::NodeId;
use route_search::heuristic::EuclideanHeuristic;
use route_search::profiling::PeakAlloc;

#[global_allocator]
static GLOBAL: PeakAlloc<std::alloc::System> = PeakAlloc::new(std::alloc::System);

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random geometric graphs");
    let config = SearchConfig::default();

    for (nodes, k) in [(200usize, 4usize), (1_000, 5), (5_000, 6)] {
        for seed in 0..2u64 {
            let graph = random_geometric_graph(seed, nodes, k).unwrap();
            let start = NodeId::from("n0");
            let goal = NodeId::from(format!("n{}", nodes - 1));
            let heuristic = EuclideanHeuristic::new(&graph, &goal);
            let instance_name = format!("{nodes}n/{k}k:{seed}");

            for algorithm in Algorithm::ALL {
                group.bench_with_input(
                    BenchmarkId::new(algorithm.to_string(), &instance_name),
                    &graph,
                    |b, g| b.iter(|| search(algorithm, g, &start, &goal, &heuristic, &config)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
