//! Implementation of Dijkstra's shortest-path algorithm.
//!
//! Not one of the compared searches; it serves as the ground truth that the
//! other searches are checked against.

use num_traits::Zero;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::data_structures::MinHeap;
use crate::error::SearchError;
use crate::frontier::FrontierEntry;
use crate::frontier::SequenceCounter;
use crate::graph::WeightedGraph;

/// Settles nodes in order of their distance from the start.
///
/// Iterating yields every node reachable from the start exactly once, with
/// its shortest distance.
#[derive(Debug)]
pub struct DijkstraSearch<'g, G>
where
    G: WeightedGraph,
{
    graph: &'g G,
    /// Entries keyed by `g`.
    open: MinHeap<FrontierEntry<G::Node>>,
    seq: SequenceCounter,
    distances: FxHashMap<G::Node, Cost>,
    settled: FxHashSet<G::Node>,
}

impl<'g, G> DijkstraSearch<'g, G>
where
    G: WeightedGraph,
{
    pub fn new(graph: &'g G, start: &G::Node) -> Result<Self, SearchError> {
        graph.require(start)?;

        let mut search = Self {
            graph,
            open: MinHeap::new(),
            seq: SequenceCounter::default(),
            distances: FxHashMap::default(),
            settled: FxHashSet::default(),
        };
        search.reach(start.clone(), Cost::zero());
        Ok(search)
    }

    /// Settles the next closest node.
    pub fn settle_next(&mut self) -> Result<Option<(G::Node, f64)>, SearchError> {
        while let Some(entry) = self.open.pop() {
            let node = entry.node;
            if !self.settled.insert(node.clone()) {
                continue;
            }
            let g = entry.key;

            let graph = self.graph;
            for next in graph.neighbours(&node)? {
                if self.settled.contains(next) {
                    continue;
                }
                let tentative = g + Cost::new(graph.edge_weight(&node, next));
                if self.distances.get(next).is_none_or(|&known| tentative < known) {
                    self.reach(next.clone(), tentative);
                }
            }
            return Ok(Some((node, g.get())));
        }
        Ok(None)
    }

    #[inline(always)]
    fn reach(&mut self, node: G::Node, g: Cost) {
        let seq = self.seq.next();
        self.distances.insert(node.clone(), g);
        self.open.push(FrontierEntry::new(g, seq, node));
    }
}

impl<G> Iterator for DijkstraSearch<'_, G>
where
    G: WeightedGraph,
{
    type Item = Result<(G::Node, f64), SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.settle_next().transpose()
    }
}

/// Shortest distances from `start` to every reachable node.
pub fn shortest_distances<G>(
    graph: &G,
    start: &G::Node,
) -> Result<FxHashMap<G::Node, f64>, SearchError>
where
    G: WeightedGraph,
{
    DijkstraSearch::new(graph, start)?.collect()
}

/// The cost of a cheapest route, or `None` if `goal` can't be reached.
pub fn shortest_path_cost<G>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
) -> Result<Option<f64>, SearchError>
where
    G: WeightedGraph,
{
    graph.require(goal)?;
    for settled in DijkstraSearch::new(graph, start)? {
        let (node, g) = settled?;
        if node == *goal {
            return Ok(Some(g));
        }
    }
    Ok(None)
}
