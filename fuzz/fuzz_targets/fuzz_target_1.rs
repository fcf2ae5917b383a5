#![no_main]

use libfuzzer_sys::fuzz_target;

use route_search::algorithms::Algorithm;
use route_search::algorithms::SearchConfig;
use route_search::algorithms::dijkstra::shortest_path_cost;
use route_search::algorithms::search;
use route_search::graph::Graph;
use route_search::graph::NodeId;
use route_search::graph::WeightedGraph;
use route_search::heuristic::ZeroHeuristic;
use route_search::profiling::PeakAlloc;

#[global_allocator]
static GLOBAL: PeakAlloc<std::alloc::System> = PeakAlloc::new(std::alloc::System);

/// First byte picks the node count, then every `(a, b, w)` triple adds an edge.
fn graph_from_bytes(data: &[u8]) -> Option<Graph> {
    let (&n, edges) = data.split_first()?;
    let n = usize::from(n % 16) + 1;
    let mut graph = Graph::with_capacity(n);
    for i in 0..n {
        graph.add_node(format!("n{i}"));
    }
    for edge in edges.chunks_exact(3) {
        let (a, b) = (usize::from(edge[0]) % n, usize::from(edge[1]) % n);
        // Repeated pairs keep their first weight.
        graph
            .add_edge(format!("n{a}"), format!("n{b}"), f64::from(edge[2]))
            .unwrap();
    }
    Some(graph)
}

fuzz_target!(|data: &[u8]| {
    let Some(graph) = graph_from_bytes(data) else {
        return;
    };
    let start = NodeId::from("n0");
    let goal = NodeId::from(format!("n{}", graph.node_count() - 1));
    let optimal = shortest_path_cost(&graph, &start, &goal).unwrap();

    for algorithm in Algorithm::ALL {
        let result = search(
            algorithm,
            &graph,
            &start,
            &goal,
            &ZeroHeuristic,
            &SearchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.found(), optimal.is_some(), "{algorithm}");
        let Some(optimal) = optimal else {
            assert_eq!(result.metrics.solution_depth(), Some(-1));
            continue;
        };
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&goal));
        for w in result.path.windows(2) {
            assert!(graph.weight(&w[0], &w[1]).is_some(), "{algorithm} used a missing edge");
        }
        let cost = result.metrics.path_cost().unwrap();
        assert!(cost >= optimal - 1e-9, "{algorithm} beat the optimum");
        if algorithm == Algorithm::AStar {
            assert!((cost - optimal).abs() < 1e-9);
        }
    }
});
