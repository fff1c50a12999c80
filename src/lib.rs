//! A [disjoint-sets/union-find] implementation and an ordered map backed by a
//! [binary search tree].
//!
//! The first main struct of this crate is [`DisjointSets`] which keeps track of a partition of
//! the elements `0 .. n` in sets.
//! The elements each start in their own set and these sets can be joined with the `union` method.
//! You can check if elements share a set with the `connected` method, ask for the size of a set
//! with `size_of` and iterate on the elements in a set with the `set` method.
//! The `union` and `connected` methods use path compression and union by size and have an
//! amortized complexity of `O(α(n))` where 'α' is the inverse Ackermann function.
//! The `α(n)` has value below 5 for any `n` that can be written in the observable universe.
//!
//! This can be used for example to keep track of the connected components of an undirected graph.
//!
//! The second main struct is [`BstMap<K, V>`], a map with the interface of a `BTreeMap<K, V>`
//! stored in a plain binary search tree.
//! The tree is never rebalanced, so every operation takes `O(h)` time where `h` is the height
//! of the tree. Inserting keys in a random order gives an expected height of `O(log n)`,
//! inserting them in sorted order gives a height of `n`.
//! None of the operations recurse over the tree so even such a degenerate tree is safe to use.
//!
//! Both structures are meant for use from a single thread.
//! The optional `rayon` feature lets a `BstMap<K, V>` be built from and read through
//! parallel iterators and the optional `proptest` feature provides `Arbitrary` implementations.
//! Both are enabled by default.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
//! [`DisjointSets`]: disjoint_sets/struct.DisjointSets.html
//! [`BstMap<K, V>`]: bst_map/struct.BstMap.html

/// A convenient macro to create a `BitVec` similar to `vec!`.
macro_rules! bit_vec {
    ($element: expr; $len: expr) => {
        bit_vec::BitVec::from_elem($len, $element)
    };
}

mod error;
pub mod disjoint_sets;
pub mod bst_map;

pub use {
    error::OutOfRange,
    disjoint_sets::DisjointSets,
    bst_map::BstMap,
};

#[cfg(test)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
