//! Implementation of search algorithms.
//!
//! Every algorithm is a pure function of `(graph, start, goal[, heuristic])`
//! that returns the route found together with its [`Metrics`]. The searches
//! are also available as explicit state structs (`BfsSearch`, `AStarSearch`,
//! ...) whose `run` produces an uninstrumented [`SearchRun`].

use clap::ValueEnum;
use derive_more::Display;
use serde::Serialize;

use crate::error::SearchError;
use crate::graph::WeightedGraph;
use crate::heuristic::Heuristic;
use crate::instrument::FrontierLog;
use crate::instrument::SearchResult;
use crate::instrument::SearchRun;
use crate::metrics::Metrics;
use crate::metrics::keys;
use crate::path::ParentMap;
use crate::path::path_cost;
use crate::path::reconstruct_path;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;
pub mod iddfs;

pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use greedy::greedy_best_first;
pub use iddfs::iddfs;

/// Depth limit used by IDDFS unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 50;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
pub enum Algorithm {
    #[display("BFS")]
    #[serde(rename = "BFS")]
    Bfs,
    #[display("DFS")]
    #[serde(rename = "DFS")]
    Dfs,
    #[display("IDDFS")]
    #[serde(rename = "IDDFS")]
    Iddfs,
    #[display("GreedyBestFirst")]
    #[serde(rename = "GreedyBestFirst")]
    #[value(name = "greedy")]
    Greedy,
    #[display("A*")]
    #[serde(rename = "A*")]
    #[value(name = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Iddfs,
        Algorithm::Greedy,
        Algorithm::AStar,
    ];
}

/// Knobs shared by all the searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest limit tried by IDDFS.
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Runs `algorithm` from `start` to `goal`.
///
/// Uninformed algorithms ignore `heuristic`.
pub fn search<G, H>(
    algorithm: Algorithm,
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: &H,
    config: &SearchConfig,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    match algorithm {
        Algorithm::Bfs => bfs(graph, start, goal),
        Algorithm::Dfs => dfs(graph, start, goal),
        Algorithm::Iddfs => iddfs(graph, start, goal, config.max_depth),
        Algorithm::Greedy => greedy_best_first(graph, start, goal, heuristic),
        Algorithm::AStar => astar(graph, start, goal, heuristic),
    }
}

/// Checks the endpoints of a search before exploring anything.
fn require_endpoints<G>(graph: &G, start: &G::Node, goal: &G::Node) -> Result<(), SearchError>
where
    G: WeightedGraph,
{
    graph.require(start)?;
    graph.require(goal)
}

/// Reconstructs the route to `goal` and fills in the domain metrics.
fn finish<G>(
    algorithm: Algorithm,
    graph: &G,
    parents: &ParentMap<G::Node>,
    goal: &G::Node,
    nodes_expanded: usize,
    frontier: FrontierLog,
) -> SearchRun<G::Node>
where
    G: WeightedGraph,
{
    let path = reconstruct_path(parents, parents.root(), goal);
    let depth = solution_depth(&path);

    let mut metrics = Metrics::new();
    metrics.insert(keys::ALGORITHM, algorithm.to_string());
    metrics.insert(keys::NODES_EXPANDED, nodes_expanded as i64);
    metrics.insert(keys::PATH_COST, path_cost(graph, &path));
    metrics.insert(keys::SOLUTION_DEPTH, depth);

    log::debug!(
        "{algorithm} from {} to {goal} expanded {nodes_expanded} nodes. Depth: {depth}",
        parents.root()
    );

    SearchRun {
        path,
        metrics,
        frontier,
    }
}

/// Edges in a path, or `-1` for no path.
#[must_use]
pub fn solution_depth<N>(path: &[N]) -> i64 {
    if path.is_empty() {
        -1
    } else {
        path.len() as i64 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::ZeroHeuristic;
    use crate::testing::*;

    #[test]
    fn display_names() {
        let names: Vec<_> = Algorithm::ALL.iter().map(Algorithm::to_string).collect();
        assert_eq!(names, ["BFS", "DFS", "IDDFS", "GreedyBestFirst", "A*"]);
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), r#""A*""#);
        assert_eq!(Algorithm::from_str("astar", true), Ok(Algorithm::AStar));
        assert_eq!(Algorithm::from_str("greedy", true), Ok(Algorithm::Greedy));
        assert_eq!(Algorithm::from_str("iddfs", true), Ok(Algorithm::Iddfs));
    }

    #[test]
    fn depth_of_paths() {
        assert_eq!(solution_depth::<&str>(&[]), -1);
        assert_eq!(solution_depth(&["A"]), 0);
        assert_eq!(solution_depth(&["A", "B", "C"]), 2);
    }

    #[test]
    fn every_algorithm_reports_the_same_keys() {
        let _guard = serial();
        let g = diamond();

        for algorithm in Algorithm::ALL {
            let result = search(
                algorithm,
                &g,
                &n("A"),
                &n("D"),
                &ZeroHeuristic,
                &SearchConfig::default(),
            )
            .unwrap();

            assert_eq!(result.metrics.algorithm(), Some(algorithm.to_string().as_str()));
            assert_eq!(result.path.first(), Some(&n("A")));
            assert_eq!(result.path.last(), Some(&n("D")));
            assert_eq!(result.metrics.solution_depth(), Some(2));
            assert_eq!(result.metrics.path_cost(), Some(2.0));
            assert!(result.metrics.nodes_expanded().unwrap() >= 1);
            assert!(result.metrics.runtime_sec().is_some());
            assert!(result.metrics.peak_memory_bytes().is_some());
            assert!(result.metrics.frontier_peak_size().is_some());
            assert_eq!(
                result.metrics.max_depth_reached().is_some(),
                algorithm == Algorithm::Iddfs
            );
        }
    }

    #[test]
    fn start_is_goal() {
        let _guard = serial();
        let g = diamond();

        for algorithm in Algorithm::ALL {
            let result = search(
                algorithm,
                &g,
                &n("B"),
                &n("B"),
                &ZeroHeuristic,
                &SearchConfig::default(),
            )
            .unwrap();
            assert_eq!(names(&result.path), ["B"], "{algorithm}");
            assert_eq!(result.metrics.path_cost(), Some(0.0));
            assert_eq!(result.metrics.solution_depth(), Some(0));
            assert!(result.metrics.nodes_expanded().unwrap() >= 1);
        }
    }

    #[test]
    fn unreachable_goal() {
        let _guard = serial();
        let g = two_components();

        for algorithm in Algorithm::ALL {
            let result = search(
                algorithm,
                &g,
                &n("A"),
                &n("Y"),
                &ZeroHeuristic,
                &SearchConfig::default(),
            )
            .unwrap();
            assert!(result.path.is_empty(), "{algorithm}");
            assert_eq!(result.metrics.solution_depth(), Some(-1));
            assert_eq!(result.metrics.path_cost(), Some(0.0));
        }
    }

    #[test]
    fn missing_endpoints_fail_fast() {
        let _guard = serial();
        let g = diamond();

        for algorithm in Algorithm::ALL {
            for (start, goal) in [("A", "Z"), ("Z", "A")] {
                let result = search(
                    algorithm,
                    &g,
                    &n(start),
                    &n(goal),
                    &ZeroHeuristic,
                    &SearchConfig::default(),
                );
                assert!(
                    matches!(result, Err(SearchError::NodeNotFound(ref name)) if name == "Z"),
                    "{algorithm}: {result:?}"
                );
            }
        }
    }
}
