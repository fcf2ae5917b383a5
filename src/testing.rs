//! Shared test helpers.

use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::graph::Graph;
use crate::graph::NodeId;

static PROFILING: Mutex<()> = Mutex::new(());

/// Serializes tests that open a profiling scope.
pub fn serial() -> MutexGuard<'static, ()> {
    PROFILING.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn n(name: &str) -> NodeId {
    NodeId::from(name)
}

pub fn names(path: &[NodeId]) -> Vec<&str> {
    path.iter().map(NodeId::as_str).collect()
}

/// `A-B(1), B-D(1), A-C(1), C-D(1)`
pub fn diamond() -> Graph {
    Graph::from_edges([("A", "B", 1.0), ("B", "D", 1.0), ("A", "C", 1.0), ("C", "D", 1.0)])
        .unwrap()
}

/// `A-B-C-D` with unit weights.
pub fn line() -> Graph {
    Graph::from_edges([("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 1.0)]).unwrap()
}

/// A triangle `A-B-C` plus a separate `X-Y` component.
pub fn two_components() -> Graph {
    Graph::from_edges([
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "A", 1.0),
        ("X", "Y", 1.0),
    ])
    .unwrap()
}

/// A short cheap route `S-B-C-G` and a route `S-A-G` with an expensive last
/// edge that [`adversarial_heuristic`] makes look attractive.
pub fn adversarial() -> Graph {
    Graph::from_edges([
        ("S", "A", 1.0),
        ("A", "G", 10.0),
        ("S", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "G", 1.0),
    ])
    .unwrap()
}

pub fn adversarial_heuristic(node: &NodeId) -> f64 {
    match node.as_str() {
        "A" | "G" => 0.0,
        _ => 5.0,
    }
}
