use crate::graph::Position;
use crate::graph::WeightedGraph;

/// An estimate of the remaining cost from a node to the (fixed) goal.
///
/// Estimates must be nonnegative. A* only returns optimal paths when the
/// estimate is admissible and consistent, which is assumed rather than
/// checked.
pub trait Heuristic<N> {
    fn h(&self, node: &N) -> f64;
}

impl<N, F> Heuristic<N> for F
where
    F: Fn(&N) -> f64,
{
    #[inline(always)]
    fn h(&self, node: &N) -> f64 {
        self(node)
    }
}

/// No information at all. Turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    #[inline(always)]
    fn h(&self, _node: &N) -> f64 {
        0.0
    }
}

/// Straight-line distance to the goal using node positions.
///
/// Degrades to `0.0` (uninformed search) for nodes without a position, or for
/// every node when the goal has none.
#[derive(Debug)]
pub struct EuclideanHeuristic<'g, G>
where
    G: WeightedGraph,
{
    graph: &'g G,
    goal: Option<Position>,
}

impl<'g, G> EuclideanHeuristic<'g, G>
where
    G: WeightedGraph,
{
    #[must_use]
    pub fn new(graph: &'g G, goal: &G::Node) -> Self {
        let goal = graph.position(goal);
        if goal.is_none() {
            log::debug!("Goal has no position, Euclidean heuristic degrades to h=0");
        }
        Self { graph, goal }
    }
}

impl<G> Heuristic<G::Node> for EuclideanHeuristic<'_, G>
where
    G: WeightedGraph,
{
    fn h(&self, node: &G::Node) -> f64 {
        match (self.goal, self.graph.position(node)) {
            (Some(goal), Some(p)) => p.distance(&goal),
            _ => 0.0,
        }
    }
}
