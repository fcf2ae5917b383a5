//! A* search.

use num_traits::Zero;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::algorithms::Algorithm;
use crate::algorithms::finish;
use crate::algorithms::require_endpoints;
use crate::cost::Cost;
use crate::data_structures::MinHeap;
use crate::error::SearchError;
use crate::frontier::FrontierEntry;
use crate::frontier::SequenceCounter;
use crate::graph::WeightedGraph;
use crate::heuristic::Heuristic;
use crate::instrument::FrontierLog;
use crate::instrument::SearchResult;
use crate::instrument::SearchRun;
use crate::instrument::run_with_metrics;
use crate::path::ParentMap;

/// Finds a cheapest route, given an admissible and consistent heuristic.
pub fn astar<G, H>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: &H,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    run_with_metrics(|| AStarSearch::new(graph, start, goal, heuristic)?.run())
}

/// The state of an A* search.
///
/// Instead of re-ranking open entries when a cheaper route to a node shows
/// up, a new entry is pushed and the older ones are left behind. Popping a
/// node that is already closed is a no-op.
///
/// ```pseudocode
/// for entry in open:
///   entry.key >= g[entry.node] + h(entry.node)
/// ```
#[derive(Debug)]
pub struct AStarSearch<'g, 'h, G, H>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    graph: &'g G,
    heuristic: &'h H,
    goal: G::Node,
    /// Entries keyed by `f = g + h`.
    open: MinHeap<FrontierEntry<G::Node>>,
    seq: SequenceCounter,
    /// Best known cost from the start.
    g: FxHashMap<G::Node, Cost>,
    closed: FxHashSet<G::Node>,
    parents: ParentMap<G::Node>,
    nodes_expanded: usize,
    frontier: FrontierLog,
}

impl<'g, 'h, G, H> AStarSearch<'g, 'h, G, H>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    pub fn new(
        graph: &'g G,
        start: &G::Node,
        goal: &G::Node,
        heuristic: &'h H,
    ) -> Result<Self, SearchError> {
        require_endpoints(graph, start, goal)?;

        let mut search = Self {
            graph,
            heuristic,
            goal: goal.clone(),
            open: MinHeap::with_capacity(2048),
            seq: SequenceCounter::default(),
            g: FxHashMap::default(),
            closed: FxHashSet::default(),
            parents: ParentMap::new(start.clone()),
            nodes_expanded: 0,
            frontier: FrontierLog::new(),
        };
        search.reach(start.clone(), Cost::zero());
        search.frontier.record(1);
        Ok(search)
    }

    pub fn run(mut self) -> Result<SearchRun<G::Node>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("AStar");

        while let Some(node) = self.pop() {
            if self.closed.contains(&node) {
                continue;
            }
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");
            self.nodes_expanded += 1;

            if node == self.goal {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                break;
            }
            self.closed.insert(node.clone());

            let g = self.g_value(&node);
            let graph = self.graph;
            for next in graph.neighbours(&node)? {
                #[cfg(feature = "coz_profile")]
                coz::scope!("ReachNode");

                let tentative = g + Cost::new(graph.edge_weight(&node, next));
                let improves = match self.g.get(next) {
                    Some(&known) => tentative < known,
                    None => true,
                };
                if improves {
                    self.parents.relax(next.clone(), node.clone());
                    self.reach(next.clone(), tentative);
                }
            }
        }

        Ok(finish(
            Algorithm::AStar,
            self.graph,
            &self.parents,
            &self.goal,
            self.nodes_expanded,
            self.frontier,
        ))
    }

    /// Records `g` as the best cost to `node` and opens an entry for it.
    #[inline(always)]
    fn reach(&mut self, node: G::Node, g: Cost) {
        let f = g + Cost::new(self.heuristic.h(&node));
        let seq = self.seq.next();
        self.g.insert(node.clone(), g);
        self.open.push(FrontierEntry::new(f, seq, node));
    }

    #[inline(always)]
    #[must_use]
    fn g_value(&self, node: &G::Node) -> Cost {
        debug_assert!(self.g.contains_key(node), "{node} was popped without a g value");
        self.g.get(node).copied().unwrap_or_else(Cost::infinity)
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<G::Node> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        if !self.open.is_empty() {
            self.frontier.record(self.open.len());
        }
        self.open.pop().map(|e| e.node)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::algorithms::dijkstra::shortest_path_cost;
    use crate::generators::grid_graph;
    use crate::generators::random_geometric_graph;
    use crate::graph::Graph;
    use crate::graph::NodeId;
    use crate::heuristic::EuclideanHeuristic;
    use crate::heuristic::ZeroHeuristic;
    use crate::path::path_cost;
    use crate::testing::*;

    #[test]
    fn diamond_costs_two() {
        let _guard = serial();
        let result = astar(&diamond(), &n("A"), &n("D"), &ZeroHeuristic).unwrap();
        assert_eq!(result.metrics.path_cost(), Some(2.0));
        assert_eq!(result.metrics.solution_depth(), Some(2));
        assert_eq!(result.metrics.algorithm(), Some("A*"));
    }

    #[test]
    fn relaxes_to_cheaper_parents() {
        // B is first reached straight from S, then more cheaply through A. Its
        // stale entry is popped before G and skipped.
        let g = Graph::from_edges([
            ("S", "A", 1.0),
            ("S", "B", 4.0),
            ("A", "B", 1.0),
            ("B", "G", 5.0),
        ])
        .unwrap();

        let run = AStarSearch::new(&g, &n("S"), &n("G"), &ZeroHeuristic)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(names(&run.path), ["S", "A", "B", "G"]);
        assert_eq!(run.metrics.path_cost(), Some(7.0));
        // S, A, B and G.
        assert_eq!(run.metrics.nodes_expanded(), Some(4));
        // The stale B still counts while it waits in the queue.
        assert_eq!(run.frontier.peak(), Some(2));
        assert_eq!(run.frontier.samples(), 6);
    }

    #[test]
    fn frontier_samples() {
        let run = AStarSearch::new(&diamond(), &n("A"), &n("D"), &ZeroHeuristic)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(run.metrics.nodes_expanded(), Some(4));
        assert_eq!(run.frontier.peak(), Some(2));
        assert_eq!(run.frontier.samples(), 5);

        let _guard = serial();
        let result = astar(&diamond(), &n("A"), &n("D"), &ZeroHeuristic).unwrap();
        assert_eq!(result.metrics.frontier_peak_size(), Some(2));
    }

    #[test]
    fn heuristic_focuses_the_search() {
        let g = grid_graph(12, 12);
        let (start, goal) = (NodeId::from("0,0"), NodeId::from("11,0"));

        let blind = AStarSearch::new(&g, &start, &goal, &ZeroHeuristic)
            .unwrap()
            .run()
            .unwrap();
        let euclidean = EuclideanHeuristic::new(&g, &goal);
        let informed = AStarSearch::new(&g, &start, &goal, &euclidean)
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(blind.metrics.path_cost(), Some(11.0));
        assert_eq!(informed.metrics.path_cost(), Some(11.0));
        assert!(informed.metrics.nodes_expanded() < blind.metrics.nodes_expanded());
    }

    #[test]
    fn unreachable_goal() {
        let _guard = serial();
        let result = astar(&two_components(), &n("B"), &n("Y"), &ZeroHeuristic).unwrap();
        assert!(result.path.is_empty());
        assert_eq!(result.metrics.solution_depth(), Some(-1));
        assert_eq!(result.metrics.nodes_expanded(), Some(3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn matches_dijkstra(seed in 0u64..10_000, nodes in 2usize..60, k in 1usize..5) {
            let g = random_geometric_graph(seed, nodes, k).unwrap();
            let start = g.nodes().next().unwrap().clone();
            let goal = g.nodes().last().unwrap().clone();
            let optimal = shortest_path_cost(&g, &start, &goal).unwrap();

            let euclidean = EuclideanHeuristic::new(&g, &goal);
            let informed = AStarSearch::new(&g, &start, &goal, &euclidean).unwrap().run().unwrap();
            let blind = AStarSearch::new(&g, &start, &goal, &ZeroHeuristic).unwrap().run().unwrap();

            for run in [informed, blind] {
                match optimal {
                    Some(optimal) => {
                        let cost = run.metrics.path_cost().unwrap();
                        prop_assert!((cost - optimal).abs() < 1e-9, "{cost} != {optimal}");
                        prop_assert_eq!(path_cost(&g, &run.path), cost);
                    }
                    None => prop_assert!(run.path.is_empty()),
                }
            }
        }
    }
}
