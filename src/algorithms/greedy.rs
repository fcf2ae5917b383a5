//! Greedy best-first search.

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

/// Follows the heuristic alone, ignoring the cost travelled so far.
pub fn greedy_best_first<G, H>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: &H,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    run_with_metrics(|| GreedySearch::new(graph, start, goal, heuristic)?.run())
}

/// The state of a greedy best-first search.
///
/// The open list is keyed by `h` only and may hold several entries per node.
/// Nodes are marked visited when popped, later entries for them are skipped.
/// A node keeps the parent it was first discovered from.
#[derive(Debug)]
pub struct GreedySearch<'g, 'h, G, H>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    graph: &'g G,
    heuristic: &'h H,
    goal: G::Node,
    open: MinHeap<FrontierEntry<G::Node>>,
    seq: SequenceCounter,
    visited: FxHashSet<G::Node>,
    parents: ParentMap<G::Node>,
    nodes_expanded: usize,
    frontier: FrontierLog,
}

impl<'g, 'h, G, H> GreedySearch<'g, 'h, G, H>
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
            open: MinHeap::new(),
            seq: SequenceCounter::default(),
            visited: FxHashSet::default(),
            parents: ParentMap::new(start.clone()),
            nodes_expanded: 0,
            frontier: FrontierLog::new(),
        };
        search.push(start.clone());
        search.frontier.record(1);
        Ok(search)
    }

    pub fn run(mut self) -> Result<SearchRun<G::Node>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Greedy");

        while let Some(node) = self.pop() {
            // Stale entry
            if !self.visited.insert(node.clone()) {
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

            let graph = self.graph;
            for next in graph.neighbours(&node)? {
                if self.visited.contains(next) {
                    continue;
                }
                self.parents.discover(next, &node);
                self.push(next.clone());
            }
        }

        Ok(finish(
            Algorithm::Greedy,
            self.graph,
            &self.parents,
            &self.goal,
            self.nodes_expanded,
            self.frontier,
        ))
    }

    #[inline(always)]
    fn push(&mut self, node: G::Node) {
        let key = Cost::new(self.heuristic.h(&node));
        let seq = self.seq.next();
        self.open.push(FrontierEntry::new(key, seq, node));
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<G::Node> {
        if !self.open.is_empty() {
            self.frontier.record(self.open.len());
        }
        self.open.pop().map(|e| e.node)
    }
}
