//! Breadth-first search.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::algorithms::Algorithm;
use crate::algorithms::finish;
use crate::algorithms::require_endpoints;
use crate::error::SearchError;
use crate::graph::WeightedGraph;
use crate::instrument::FrontierLog;
use crate::instrument::SearchResult;
use crate::instrument::SearchRun;
use crate::instrument::run_with_metrics;
use crate::path::ParentMap;

/// Finds a route with the fewest edges.
///
/// The route's `path_cost` is measured with the real edge weights, but they
/// play no role in choosing it.
pub fn bfs<G>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph,
{
    run_with_metrics(|| BfsSearch::new(graph, start, goal)?.run())
}

/// The state of a breadth-first search.
///
/// Nodes are marked explored when they are enqueued, so each node enters the
/// queue at most once.
#[derive(Debug)]
pub struct BfsSearch<'g, G>
where
    G: WeightedGraph,
{
    graph: &'g G,
    goal: G::Node,
    queue: VecDeque<G::Node>,
    explored: FxHashSet<G::Node>,
    parents: ParentMap<G::Node>,
    nodes_expanded: usize,
    frontier: FrontierLog,
}

impl<'g, G> BfsSearch<'g, G>
where
    G: WeightedGraph,
{
    pub fn new(graph: &'g G, start: &G::Node, goal: &G::Node) -> Result<Self, SearchError> {
        require_endpoints(graph, start, goal)?;

        let mut frontier = FrontierLog::new();
        frontier.record(1);
        Ok(Self {
            graph,
            goal: goal.clone(),
            queue: VecDeque::from([start.clone()]),
            explored: FxHashSet::from_iter([start.clone()]),
            parents: ParentMap::new(start.clone()),
            nodes_expanded: 0,
            frontier,
        })
    }

    pub fn run(mut self) -> Result<SearchRun<G::Node>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Bfs");

        while let Some(node) = self.pop() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");
            self.nodes_expanded += 1;

            if node == self.goal {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                break;
            }

            for next in self.graph.neighbours(&node)? {
                if self.explored.insert(next.clone()) {
                    self.parents.discover(next, &node);
                    self.queue.push_back(next.clone());
                }
            }
        }

        Ok(finish(
            Algorithm::Bfs,
            self.graph,
            &self.parents,
            &self.goal,
            self.nodes_expanded,
            self.frontier,
        ))
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<G::Node> {
        if !self.queue.is_empty() {
            self.frontier.record(self.queue.len());
        }
        self.queue.pop_front()
    }
}
