//! Parent maps, path reconstruction and path costs.

use rustc_hash::FxHashMap;

use crate::graph::Node;
use crate::graph::WeightedGraph;

/// The search tree as a partial `node -> parent` function rooted at the start.
///
/// Two update rules are offered,
/// - `discover`: first write wins (BFS, DFS, IDDFS, Greedy).
/// - `relax`: overwrite with a better parent (A*).
///
/// The root never gets a parent, so following links always ends at the root.
#[derive(Clone, Debug)]
pub struct ParentMap<N>
where
    N: Node,
{
    root: N,
    parents: FxHashMap<N, N>,
}

impl<N> ParentMap<N>
where
    N: Node,
{
    #[must_use]
    pub fn new(root: N) -> Self {
        Self {
            root,
            parents: FxHashMap::default(),
        }
    }

    /// Rebuilds the parent chain of a path.
    ///
    /// Returns `None` for an empty path.
    #[must_use]
    pub fn from_path(path: &[N]) -> Option<Self> {
        let mut parents = Self::new(path.first()?.clone());
        for w in path.windows(2) {
            parents.discover(&w[1], &w[0]);
        }
        Some(parents)
    }

    #[inline(always)]
    #[must_use]
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Records `parent` as the parent of `child` unless `child` already has
    /// one (or is the root).
    ///
    /// Returns whether the parent was recorded.
    #[inline(always)]
    pub fn discover(&mut self, child: &N, parent: &N) -> bool {
        if *child == self.root || self.parents.contains_key(child) {
            return false;
        }
        self.parents.insert(child.clone(), parent.clone());
        true
    }

    /// Makes `parent` the parent of `child`, replacing any previous one.
    #[inline(always)]
    pub fn relax(&mut self, child: N, parent: N) {
        debug_assert!(child != self.root, "The root can't be re-parented");
        debug_assert!(child != parent);
        self.parents.insert(child, parent);
    }

    #[inline(always)]
    #[must_use]
    pub fn parent(&self, node: &N) -> Option<&N> {
        self.parents.get(node)
    }

    /// Nodes with a recorded parent (the root is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Follows parent links back from `goal` and returns the `start..=goal` path.
///
/// Returns an empty path when the chain does not end at `start`, which is how
/// an unreached goal shows up.
#[must_use]
pub fn reconstruct_path<N>(parents: &ParentMap<N>, start: &N, goal: &N) -> Vec<N>
where
    N: Node,
{
    #[cfg(feature = "coz_profile")]
    coz::scope!("PathReconstruction");

    let mut path = vec![goal.clone()];
    let mut node = goal;
    while let Some(parent) = parents.parent(node) {
        debug_assert!(
            path.len() <= parents.len(),
            "Parent links of {goal} cycle back on themselves"
        );
        path.push(parent.clone());
        node = parent;
    }
    path.reverse();

    if path.first() == Some(start) {
        path
    } else {
        vec![]
    }
}

/// Total weight of a path. Empty and single-node paths cost `0.0`.
#[must_use]
pub fn path_cost<G>(graph: &G, path: &[G::Node]) -> f64
where
    G: WeightedGraph,
{
    path.windows(2)
        .fold(0.0, |cost, w| cost + graph.edge_weight(&w[0], &w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::graph::NodeId;

    fn nodes(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|&n| NodeId::from(n)).collect()
    }

    #[test]
    fn reconstructs_from_goal() {
        let [a, b, c, d] = ["A", "B", "C", "D"].map(NodeId::from);
        let mut parents = ParentMap::new(a.clone());
        parents.discover(&b, &a);
        parents.discover(&c, &b);
        parents.discover(&d, &a);

        assert_eq!(reconstruct_path(&parents, &a, &c), nodes(&["A", "B", "C"]));
        assert_eq!(reconstruct_path(&parents, &a, &d), nodes(&["A", "D"]));
        assert_eq!(reconstruct_path(&parents, &a, &a), nodes(&["A"]));
    }

    #[test]
    fn unreached_goal_is_empty() {
        let [a, b, z] = ["A", "B", "Z"].map(NodeId::from);
        let mut parents = ParentMap::new(a.clone());
        parents.discover(&b, &a);

        assert!(reconstruct_path(&parents, &a, &z).is_empty());
        // A chain that doesn't end at the requested start.
        assert!(reconstruct_path(&parents, &b, &b).is_empty());
        assert!(reconstruct_path(&parents, &z, &b).is_empty());
    }

    #[test]
    fn discover_keeps_first_parent() {
        let [a, b, c] = ["A", "B", "C"].map(NodeId::from);
        let mut parents = ParentMap::new(a.clone());
        assert!(parents.discover(&c, &a));
        assert!(!parents.discover(&c, &b));
        assert!(!parents.discover(&a, &c));
        assert_eq!(parents.parent(&c), Some(&a));
        assert_eq!(parents.parent(&a), None);
        assert_eq!(parents.len(), 1);
    }

    #[test]
    fn relax_replaces_parent() {
        let [a, b, c] = ["A", "B", "C"].map(NodeId::from);
        let mut parents = ParentMap::new(a.clone());
        parents.relax(c.clone(), a.clone());
        parents.relax(c.clone(), b.clone());
        parents.relax(b.clone(), a.clone());
        assert_eq!(reconstruct_path(&parents, &a, &c), nodes(&["A", "B", "C"]));
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let path = nodes(&["S", "X", "Y", "Z", "G"]);
        let parents = ParentMap::from_path(&path).unwrap();
        let again = reconstruct_path(&parents, &path[0], &path[4]);
        assert_eq!(again, path);

        let parents = ParentMap::from_path(&again).unwrap();
        assert_eq!(reconstruct_path(&parents, &again[0], &again[4]), path);

        assert!(ParentMap::<NodeId>::from_path(&[]).is_none());
    }

    #[test]
    fn costs() {
        let mut g = Graph::from_edges([("A", "B", 1.5), ("B", "C", 2.0)]).unwrap();
        g.add_unweighted_edge("C", "D");

        assert_eq!(path_cost(&g, &[]), 0.0);
        assert_eq!(path_cost(&g, &nodes(&["A"])), 0.0);
        assert_eq!(path_cost(&g, &nodes(&["A", "B"])), 1.5);
        assert_eq!(path_cost(&g, &nodes(&["A", "B", "C", "D"])), 4.5);
    }
}
