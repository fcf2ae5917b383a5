//! Iterative deepening depth-first search.

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
use crate::metrics::keys;
use crate::path::ParentMap;

/// Finds a route by running depth-limited DFS with limits `0..=max_depth`.
///
/// On success the metrics carry `max_depth_reached`, the limit at which the
/// goal was found.
pub fn iddfs<G>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    max_depth: usize,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph,
{
    run_with_metrics(|| IddfsSearch::new(graph, start, goal, max_depth)?.run())
}

/// The state of an iterative deepening search.
///
/// Every pass starts from scratch with its own visited set and parent map,
/// only the expansion counter and the frontier log carry over.
#[derive(Debug)]
pub struct IddfsSearch<'g, G>
where
    G: WeightedGraph,
{
    graph: &'g G,
    start: G::Node,
    goal: G::Node,
    max_depth: usize,
    nodes_expanded: usize,
    frontier: FrontierLog,
}

impl<'g, G> IddfsSearch<'g, G>
where
    G: WeightedGraph,
{
    pub fn new(
        graph: &'g G,
        start: &G::Node,
        goal: &G::Node,
        max_depth: usize,
    ) -> Result<Self, SearchError> {
        require_endpoints(graph, start, goal)?;

        Ok(Self {
            graph,
            start: start.clone(),
            goal: goal.clone(),
            max_depth,
            nodes_expanded: 0,
            frontier: FrontierLog::new(),
        })
    }

    pub fn run(mut self) -> Result<SearchRun<G::Node>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Iddfs");

        for limit in 0..=self.max_depth {
            let expanded_before = self.nodes_expanded;
            let found = self.depth_limited(limit)?;
            log::trace!(
                "IDDFS pass with limit {limit} expanded {} nodes",
                self.nodes_expanded - expanded_before
            );

            if let Some(parents) = found {
                let mut run = finish(
                    Algorithm::Iddfs,
                    self.graph,
                    &parents,
                    &self.goal,
                    self.nodes_expanded,
                    self.frontier,
                );
                run.metrics.insert(keys::MAX_DEPTH_REACHED, limit as i64);
                return Ok(run);
            }
        }

        log::debug!(
            "IDDFS gave up on {} after limit {}",
            self.goal,
            self.max_depth
        );
        Ok(finish(
            Algorithm::Iddfs,
            self.graph,
            &ParentMap::new(self.start.clone()),
            &self.goal,
            self.nodes_expanded,
            self.frontier,
        ))
    }

    /// One DFS pass that doesn't expand nodes deeper than `limit`.
    ///
    /// Returns the pass' parent map if the goal was reached.
    fn depth_limited(
        &mut self,
        limit: usize,
    ) -> Result<Option<ParentMap<G::Node>>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("DepthLimitedPass");

        let mut stack = vec![(self.start.clone(), 0usize)];
        let mut visited = FxHashSet::from_iter([self.start.clone()]);
        let mut parents = ParentMap::new(self.start.clone());

        loop {
            if !stack.is_empty() {
                self.frontier.record(stack.len());
            }
            let Some((node, depth)) = stack.pop() else {
                return Ok(None);
            };
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");
            self.nodes_expanded += 1;

            if node == self.goal {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                return Ok(Some(parents));
            }

            if depth < limit {
                for next in self.graph.neighbours(&node)? {
                    if visited.insert(next.clone()) {
                        parents.discover(next, &node);
                        stack.push((next.clone(), depth + 1));
                    }
                }
            }
        }
    }
}
