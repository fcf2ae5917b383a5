//! The read-only graph seen by the search algorithms.
//!
//! Searches only need to enumerate nodes, enumerate neighbours, look up edge
//! weights and, for informed searches, read node positions. `WeightedGraph`
//! captures exactly that; `Graph` is the owned adjacency-list implementation
//! used by the loader, the generators and the CLI.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use derive_more::Display;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::GraphError;
use crate::error::SearchError;

/// Weight of an edge that was added without one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Anything that can identify a node during a search.
pub trait Node: Clone + Debug + std::fmt::Display + Eq + Hash + Ord {}
impl<T> Node for T where T: Clone + Debug + std::fmt::Display + Eq + Hash + Ord {}

/// An opaque, cheap to clone, string-like node identifier.
#[derive(Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[display("{_0}")]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// A point on the plane.
#[derive(Copy, Clone, Debug, Display, PartialEq, Serialize)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A read-only, undirected, nonnegatively weighted graph.
pub trait WeightedGraph: Debug {
    type Node: Node;

    /// All the nodes, in insertion order.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;
    fn node_count(&self) -> usize;
    fn contains(&self, node: &Self::Node) -> bool;

    /// Neighbours of a node, in insertion order.
    ///
    /// Fails with [`SearchError::NodeNotFound`] for nodes outside the graph.
    fn neighbours(
        &self,
        node: &Self::Node,
    ) -> Result<impl Iterator<Item = &Self::Node>, SearchError>;

    /// The weight stored on edge `a-b`, if the edge exists and has one.
    fn weight(&self, a: &Self::Node, b: &Self::Node) -> Option<f64>;

    /// The weight used to travel `a-b`, falling back to
    /// [`DEFAULT_EDGE_WEIGHT`].
    fn edge_weight(&self, a: &Self::Node, b: &Self::Node) -> f64 {
        self.weight(a, b).unwrap_or(DEFAULT_EDGE_WEIGHT)
    }

    fn position(&self, _node: &Self::Node) -> Option<Position> {
        None
    }

    /// Fails fast when a node is not part of the graph.
    fn require(&self, node: &Self::Node) -> Result<(), SearchError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(SearchError::NodeNotFound(node.to_string()))
        }
    }
}

#[derive(Clone, Debug)]
struct NodeEntry {
    id: NodeId,
    position: Option<Position>,
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    to: usize,
    weight: Option<f64>,
}

/// Owned adjacency-list graph over [`NodeId`]s.
///
/// Nodes and edges are kept in insertion order, which makes neighbour
/// enumeration (and so DFS/BFS exploration order) deterministic.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    index: FxHashMap<NodeId, usize>,
    adjacency: Vec<Vec<Edge>>,
    edges: usize,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            adjacency: Vec::with_capacity(nodes),
            edges: 0,
        }
    }

    /// Builds a graph from weighted edges, adding nodes as they appear.
    pub fn from_edges<'a, I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut graph = Self::new();
        for (a, b, w) in edges {
            graph.add_edge(a, b, w)?;
        }
        Ok(graph)
    }

    /// Adds a node, returning its internal index. Existing nodes are kept.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> usize {
        let id = id.into();
        if let Some(&i) = self.index.get(&id) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(id.clone(), i);
        self.nodes.push(NodeEntry { id, position: None });
        self.adjacency.push(vec![]);
        i
    }

    /// Adds a node (or updates an existing one) with a position.
    pub fn add_node_with_position(&mut self, id: impl Into<NodeId>, position: Position) -> usize {
        let i = self.add_node(id);
        self.nodes[i].position = Some(position);
        i
    }

    /// Adds the undirected edge `a-b`.
    ///
    /// Returns whether the edge is new. Re-adding an existing pair keeps the
    /// original weight.
    pub fn add_edge(
        &mut self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        weight: f64,
    ) -> Result<bool, GraphError> {
        let (a, b) = (a.into(), b.into());
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                a: a.to_string(),
                b: b.to_string(),
                weight,
            });
        }
        Ok(self.insert_edge(a, b, Some(weight)))
    }

    /// Adds the undirected edge `a-b` without a weight, so it travels at
    /// [`DEFAULT_EDGE_WEIGHT`].
    pub fn add_unweighted_edge(&mut self, a: impl Into<NodeId>, b: impl Into<NodeId>) -> bool {
        self.insert_edge(a.into(), b.into(), None)
    }

    fn insert_edge(&mut self, a: NodeId, b: NodeId, weight: Option<f64>) -> bool {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if self.adjacency[ia].iter().any(|e| e.to == ib) {
            return false;
        }
        self.adjacency[ia].push(Edge { to: ib, weight });
        if ia != ib {
            self.adjacency[ib].push(Edge { to: ia, weight });
        }
        self.edges += 1;
        true
    }

    pub fn set_position(&mut self, id: &NodeId, position: Position) -> Result<(), SearchError> {
        let i = self.lookup(id)?;
        self.nodes[i].position = Some(position);
        Ok(())
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// A copy of this graph where every edge travels at
    /// [`DEFAULT_EDGE_WEIGHT`].
    #[must_use]
    pub fn without_weights(&self) -> Self {
        let mut graph = self.clone();
        for edges in &mut graph.adjacency {
            for e in edges.iter_mut() {
                e.weight = None;
            }
        }
        graph
    }

    fn lookup(&self, id: &NodeId) -> Result<usize, SearchError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SearchError::NodeNotFound(id.to_string()))
    }
}

impl WeightedGraph for Graph {
    type Node = NodeId;

    fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    fn neighbours(&self, node: &NodeId) -> Result<impl Iterator<Item = &NodeId>, SearchError> {
        let i = self.lookup(node)?;
        Ok(self.adjacency[i].iter().map(|e| &self.nodes[e.to].id))
    }

    fn weight(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let ia = *self.index.get(a)?;
        let ib = *self.index.get(b)?;
        self.adjacency[ia]
            .iter()
            .find(|e| e.to == ib)
            .and_then(|e| e.weight)
    }

    fn position(&self, node: &NodeId) -> Option<Position> {
        let i = *self.index.get(node)?;
        self.nodes[i].position
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Graph({} nodes, {} edges)", self.nodes.len(), self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn edges_are_undirected() {
        let g = Graph::from_edges([("A", "B", 2.5), ("B", "C", 1.0)]).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(&n("A"), &n("B")), Some(2.5));
        assert_eq!(g.weight(&n("B"), &n("A")), Some(2.5));
        assert_eq!(g.weight(&n("A"), &n("C")), None);

        let neighbours: Vec<_> = g.neighbours(&n("B")).unwrap().cloned().collect();
        assert_eq!(neighbours, vec![n("A"), n("C")]);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut g = Graph::new();
        assert_eq!(g.add_edge("A", "B", 1.0), Ok(true));
        assert_eq!(g.add_edge("B", "A", 7.0), Ok(false));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(&n("A"), &n("B")), Some(1.0));
        assert_eq!(g.neighbours(&n("A")).unwrap().count(), 1);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let mut g = Graph::new();
        assert!(g.add_unweighted_edge("A", "B"));
        assert_eq!(g.weight(&n("A"), &n("B")), None);
        assert_eq!(g.edge_weight(&n("A"), &n("B")), DEFAULT_EDGE_WEIGHT);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut g = Graph::new();
        assert!(matches!(
            g.add_edge("A", "B", -1.0),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(g.add_edge("A", "B", f64::NAN).is_err());
        assert!(g.add_edge("A", "B", f64::INFINITY).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn unknown_nodes_fail_lookups() {
        let g = Graph::from_edges([("A", "B", 1.0)]).unwrap();
        assert!(matches!(
            g.neighbours(&n("Z")).map(|it| it.count()),
            Err(SearchError::NodeNotFound(name)) if name == "Z"
        ));
        assert!(g.require(&n("A")).is_ok());
        assert!(g.require(&n("Z")).is_err());
    }

    #[test]
    fn positions() {
        let mut g = Graph::new();
        g.add_node_with_position("A", Position::new(0.0, 0.0));
        g.add_node("B");
        assert_eq!(g.position(&n("A")), Some(Position::new(0.0, 0.0)));
        assert_eq!(g.position(&n("B")), None);

        g.set_position(&n("B"), Position::new(3.0, 4.0)).unwrap();
        assert_eq!(
            g.position(&n("A")).unwrap().distance(&g.position(&n("B")).unwrap()),
            5.0
        );
        assert!(g.set_position(&n("C"), Position::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn without_weights_keeps_structure() {
        let g = Graph::from_edges([("A", "B", 5.0), ("B", "C", 3.0)]).unwrap();
        let unit = g.without_weights();
        assert_eq!(unit.edge_count(), 2);
        assert_eq!(unit.edge_weight(&n("A"), &n("B")), 1.0);
        assert_eq!(g.edge_weight(&n("A"), &n("B")), 5.0);
    }
}
