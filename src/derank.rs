// Tournament arg-min over the children of a heap node.
//
// Frontier heaps have arity 4, so sibling groups hold at most 4 entries. The
// fixed-size tournaments keep comparisons branch-light; anything else falls
// back to a linear scan.
//
// Ties keep the left-most contender, so equal entries resolve to the lower
// index.

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: Ord>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

// 0   1
// *   *
//  \ /
//   *
#[inline(always)]
#[must_use]
fn derank_2<T: Ord>(a: &[T]) -> usize {
    debug_assert!(a.len() == 2);
    fight(a, 0, 1)
}

// 0   1   2
// *   *   *
//  \ /    |
//   *     *
//    \   /
//      *
#[inline(always)]
#[must_use]
fn derank_3<T: Ord>(a: &[T]) -> usize {
    debug_assert!(a.len() == 3);
    fight(a, fight(a, 0, 1), 2)
}

// 0   1   2   3
// *   *   *   *
//  \ /     \ /
//   *       *
//    \     /
//       *
#[inline(always)]
#[must_use]
fn derank_4<T: Ord>(a: &[T]) -> usize {
    debug_assert!(a.len() == 4);
    fight(a, fight(a, 0, 1), fight(a, 2, 3))
}

/// Index of the smallest element of a non-empty slice.
#[inline(always)]
#[must_use]
pub fn derank<T: Ord>(a: &[T]) -> usize {
    match a.len() {
        1 => 0usize,
        2 => derank_2(a),
        3 => derank_3(a),
        4 => derank_4(a),
        _ => linear_min_index(a),
    }
}

pub fn linear_min_index<T: Ord>(xs: &[T]) -> usize {
    assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}
