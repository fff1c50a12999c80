//! Contains the implementation of the [disjoint-sets/union-find].
//!
//! See [`DisjointSets`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSets`]: struct.DisjointSets.html

mod metadata;
mod union_find;

pub use self::union_find::{DisjointSets, Set, AllSets};
