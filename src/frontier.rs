//! Priority-queue entries for the informed searches.

use std::cmp::Ordering;

use crate::cost::Cost;
use crate::graph::Node;

/// An entry in a Greedy/A* frontier.
///
/// Entries are totally ordered by `(key, seq, node)`. The sequence number
/// breaks ties in insertion order, the node identifier only matters for
/// entries pushed with the same sequence number, which a [`SequenceCounter`]
/// never hands out.
#[derive(Clone, Debug)]
pub struct FrontierEntry<N> {
    /// `h` for Greedy, `g + h` for A*.
    pub key: Cost,
    pub seq: u64,
    pub node: N,
}

impl<N> FrontierEntry<N>
where
    N: Node,
{
    #[inline(always)]
    #[must_use]
    pub fn new(key: Cost, seq: u64, node: N) -> Self {
        Self { key, seq, node }
    }
}

impl<N: Node> PartialEq for FrontierEntry<N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<N: Node> Eq for FrontierEntry<N> {}

impl<N: Node> PartialOrd for FrontierEntry<N> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<N: Node> Ord for FrontierEntry<N> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Hands out increasing insertion sequence numbers.
#[derive(Copy, Clone, Debug, Default)]
pub struct SequenceCounter(u64);

impl SequenceCounter {
    #[inline(always)]
    pub fn next(&mut self) -> u64 {
        let seq = self.0;
        self.0 += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::MinHeap;
    use crate::graph::NodeId;

    #[test]
    fn orders_by_key_then_insertion() {
        let mut seq = SequenceCounter::default();
        let mut heap = MinHeap::new();
        heap.push(FrontierEntry::new(Cost::new(2.0), seq.next(), NodeId::from("late")));
        heap.push(FrontierEntry::new(Cost::new(1.0), seq.next(), NodeId::from("z")));
        heap.push(FrontierEntry::new(Cost::new(1.0), seq.next(), NodeId::from("a")));
        heap.push(FrontierEntry::new(Cost::new(0.5), seq.next(), NodeId::from("best")));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| e.node.to_string())
            .collect();
        assert_eq!(order, ["best", "z", "a", "late"]);
    }

    #[test]
    fn node_breaks_remaining_ties() {
        let a = FrontierEntry::new(Cost::new(1.0), 7, NodeId::from("a"));
        let b = FrontierEntry::new(Cost::new(1.0), 7, NodeId::from("b"));
        assert!(a < b);
        assert_eq!(a, a.clone());
    }
}
