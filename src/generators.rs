//! Synthetic graphs for benchmarks and tests.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::graph::Position;

/// `nodes` points scattered over the unit square, each linked to its `k`
/// nearest neighbours.
///
/// Edge weights are the Euclidean lengths of the edges, which keeps the
/// Euclidean heuristic admissible and consistent. Nodes are named `n0`,
/// `n1`, ... in insertion order. The same seed always builds the same graph.
pub fn random_geometric_graph(seed: u64, nodes: usize, k: usize) -> Result<Graph, GraphError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let points: Vec<Position> = (0..nodes)
        .map(|_| Position::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let mut graph = Graph::with_capacity(nodes);
    for (i, p) in points.iter().enumerate() {
        graph.add_node_with_position(format!("n{i}"), *p);
    }

    let mut by_distance: Vec<(f64, usize)> = Vec::with_capacity(nodes);
    for (i, p) in points.iter().enumerate() {
        by_distance.clear();
        by_distance.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, q)| (p.distance(q), j)),
        );
        by_distance.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for &(d, j) in by_distance.iter().take(k) {
            graph.add_edge(format!("n{i}"), format!("n{j}"), d)?;
        }
    }

    log::debug!("Generated random geometric {graph} with seed {seed}");
    Ok(graph)
}

/// A `width` x `height` 4-connected grid with unit weights.
///
/// Nodes are named `x,y` and positioned at `(x, y)`.
#[must_use]
pub fn grid_graph(width: usize, height: usize) -> Graph {
    let mut graph = Graph::with_capacity(width * height);
    let name = |x: usize, y: usize| format!("{x},{y}");

    for y in 0..height {
        for x in 0..width {
            graph.add_node_with_position(name(x, y), Position::new(x as f64, y as f64));
        }
    }
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                graph.add_unweighted_edge(name(x, y), name(x + 1, y));
            }
            if y + 1 < height {
                graph.add_unweighted_edge(name(x, y), name(x, y + 1));
            }
        }
    }
    graph
}
