// Index arithmetic for implicit d-ary heaps.
//
// The frontier heaps keep their tree in a flat array. With arity `A` every
// node `i` has children `A*i + 1 ..= A*(i + 1)` and its parent at `(i-1)/A`.
//
// ```text
//                 0
//      1      2      3      4
//   5..8   9..12 13..16 17..20
// ```
//
// The last level will often be incomplete.

/// The parent node
///
/// ```
/// use route_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// assert_eq!(index_parent::<4>(20), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) child
///
/// ```
/// use route_search::heap_primitives::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(11), 23);
/// assert_eq!(index_first_child::<4>(0), 1);
/// assert_eq!(index_first_child::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last (right-most) child
///
/// ```
/// use route_search::heap_primitives::index_last_child;
/// assert_eq!(index_last_child::<2>(0), 2);
/// assert_eq!(index_last_child::<2>(6), 14);
/// assert_eq!(index_last_child::<4>(0), 4);
/// assert_eq!(index_last_child::<4>(4), 20);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_child<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}
