use std::cmp::min;
use std::fmt::Debug;

use crate::derank::derank;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_child::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_child::<HEAP_ARITY>(i)
}

/// A d-ary min-heap.
///
/// Entries are never re-ranked in place. Searches that find a better key for
/// a node push a fresh entry and leave the old one behind; the search decides
/// whether a popped entry is still valid, so the heap only has to keep
/// `Ord` order.
///
/// ```pseudocode
/// for i in 1..heap.len():
///   assert(heap[up(i)] <= heap[i])
/// ```
#[derive(Clone, Debug)]
pub struct MinHeap<T>
where
    T: Ord + Debug,
{
    heap: Vec<T>,
}

impl<T> MinHeap<T>
where
    T: Ord + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, entry: T) {
        self.verify_heap();

        let heap_index = self.heap.len();
        self.heap.push(entry);
        self.sift_up(heap_index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<T> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        self.verify_heap();
        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let top = self.pop_non_trivial_heap();
        self.verify_heap();
        top
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Pops the top entry from a heap with at least 2 entries.
    ///
    /// Sinks the top entry all the way to the last level by always promoting
    /// the best child, then trades places with the very last entry so it can
    /// be popped off the array.
    fn pop_non_trivial_heap(&mut self) -> Option<T> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PopNonTrivial");

        debug_assert!(
            self.heap.len() >= 2,
            "It doesn't get easier. Why are you calling this?"
        );

        let len = self.heap.len();
        let last = len - 1;

        let mut hole = 0;
        loop {
            let child = down_left(hole);
            if child >= len {
                break;
            }
            debug_assert_eq!(child + HEAP_ARITY, down_right(hole) + 1);
            let best = child + derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self.heap.swap(hole, best);
            hole = best;
        }

        // The hole made it to the last level, but it may not be at the end of
        // the array.
        debug_assert!(hole <= last, "The hole={hole} is past last={last}");
        if hole != last {
            self.heap.swap(hole, last);
            self.sift_up(hole);
        }

        self.heap.pop()
    }

    /// Raises an entry
    /// Returns its new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }
}

impl<T> Default for MinHeap<T>
where
    T: Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_works() {
        let mut heap = MinHeap::<String>::new();
        assert!(heap.is_empty());

        heap.push("aoeu".to_string());
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.pop(), Some("aoeu".to_string()));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn heap_sorts() {
        let mut heap = MinHeap::<&str>::new();

        for name in ["c", "e", "f", "a", "d", "b"] {
            heap.push(name);
        }
        assert_eq!(heap.len(), 6);

        assert_eq!(heap.pop(), Some("a"));
        assert_eq!(heap.pop(), Some("b"));
        assert_eq!(heap.pop(), Some("c"));
        assert_eq!(heap.pop(), Some("d"));
        assert_eq!(heap.pop(), Some("e"));
        assert_eq!(heap.pop(), Some("f"));
        assert!(heap.is_empty());
    }

    #[test]
    fn heap_sorts_deep_trees() {
        let mut heap = MinHeap::<u32>::with_capacity(256);
        // A permutation of 0..251 (251 is prime).
        for i in 0..251u32 {
            heap.push((i * 97) % 251);
        }

        let mut popped = vec![];
        while let Some(x) = heap.pop() {
            popped.push(x);
        }
        assert_eq!(popped, (0..251u32).collect::<Vec<_>>());
    }

    #[test]
    fn heap_keeps_duplicates() {
        let mut heap = MinHeap::<u8>::new();
        for x in [3, 1, 3, 1, 2] {
            heap.push(x);
        }
        let mut popped = vec![];
        while let Some(x) = heap.pop() {
            popped.push(x);
        }
        assert_eq!(popped, vec![1, 1, 2, 3, 3]);
    }
}
