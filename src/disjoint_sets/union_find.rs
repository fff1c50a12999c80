//! A [disjoint-sets/union-find] implementation over the indices `0 .. len`.
//!
//! See [`DisjointSets`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSets`]: struct.DisjointSets.html

use {
    std::{
        ops,
        fmt,
        hash::Hash,
        cmp::Ordering,
        iter::FusedIterator,
        collections::hash_map::{self, HashMap},
    },
    log::trace,
    crate::{
        disjoint_sets::metadata::Metadata,
        error::OutOfRange,
    },
};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// A [disjoint-sets/union-find] structure partitioning the indices `0 .. len` in sets.
///
/// Initially each index has its own set but sets can be joined with the `union` method.
/// The representative of a set, its root, is found with `find`.
/// `find` uses path compression and `union` attaches the smaller tree to the larger tree,
/// together this gives an amortized complexity of `O(α(n))` per operation.
///
/// In addition to the parent and the size of each tree we store an additional index for
/// each element. These indices form a circular linked list of the set the element is in.
/// This allows for fast iteration of the set using the `set` method.
///
/// Path compression changes the structure while answering queries, which is why `find` only
/// needs a shared reference. The structure can therefore not be shared between threads.
///
/// Every method that takes an index returns an [`OutOfRange`] error if the index is not
/// below `len`.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), forests::OutOfRange> {
/// use forests::DisjointSets;
///
/// let mut disjoint_sets = DisjointSets::new(4);
/// disjoint_sets.union(1, 2)?;
/// disjoint_sets.union(2, 3)?;
///
/// assert!(disjoint_sets.connected(1, 3)?);
/// assert!(!disjoint_sets.connected(0, 3)?);
/// assert!(disjoint_sets.size_of(1)? == 3);
///
/// for index in disjoint_sets.set(1)? {
///     assert!(index >= 1);
///     assert!(index <= 3);
/// }
/// # Ok(())
/// # }
/// ```
///
/// [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
/// [`OutOfRange`]: ../struct.OutOfRange.html
#[derive(Clone)]
pub struct DisjointSets {
    /// The metadata for each element.
    meta: Vec<Metadata>,
}

/// Creates a [`DisjointSets`] where elements with equal labels share a set.
///
/// The element at position `i` gets the `i`th label. You can use any labels that implement
/// `Hash` and `Eq`. These labels will only be used when constructing the [`DisjointSets`]
/// and will not be stored further.
///
/// ```
/// # #[macro_use]
/// # extern crate forests;
/// #
/// # fn main() {
/// let disjoint_sets = disjoint_sets!['a', 'b', 'c', 'b', 'a'];
///
/// assert!(disjoint_sets.len() == 5);
/// assert!(disjoint_sets.connected(0, 4).unwrap());
/// assert!(disjoint_sets.connected(1, 3).unwrap());
/// assert!(disjoint_sets.is_singleton(2).unwrap());
/// # }
/// ```
///
/// [`DisjointSets`]: disjoint_sets/struct.DisjointSets.html
#[macro_export]
macro_rules! disjoint_sets {
    () => {
        $crate::DisjointSets::new(0)
    };
    ($($set: expr),+) => {
        $crate::DisjointSets::from_labels(vec![$($set),+])
    };
    ($($set: expr,)+) => {
        $crate::disjoint_sets![$($set),+]
    };
}

impl DisjointSets {
    /// Constructs a new `DisjointSets` of `len` elements, each in its own set.
    ///
    /// # Examples
    ///
    /// ```
    /// use forests::DisjointSets;
    ///
    /// let disjoint_sets = DisjointSets::new(3);
    ///
    /// assert!(disjoint_sets.len() == 3);
    /// assert!(disjoint_sets.amount_of_sets() == 3);
    /// ```
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            meta: (0 .. len).map(Metadata::new).collect(),
        }
    }

    /// Constructs a `DisjointSets` with an element for every label where elements with
    /// equal labels share a set.
    ///
    /// This is used by the `disjoint_sets!` macro.
    ///
    /// # Examples
    ///
    /// ```
    /// use forests::DisjointSets;
    ///
    /// let disjoint_sets = DisjointSets::from_labels("abcab".chars());
    ///
    /// assert!(disjoint_sets.len() == 5);
    /// assert!(disjoint_sets.amount_of_sets() == 3);
    /// assert!(disjoint_sets.connected(1, 4).unwrap());
    /// ```
    pub fn from_labels<I, L>(labels: I) -> Self where
        I: IntoIterator<Item = L>,
        L: Hash + Eq,
    {
        let labels = labels.into_iter();
        let (capacity, _) = labels.size_hint();

        let mut disjoint_sets = Self { meta: Vec::with_capacity(capacity) };
        // We map a label to the first index that carried it.
        let mut map = HashMap::with_capacity(capacity);

        for (index, label) in labels.enumerate() {
            disjoint_sets.meta.push(Metadata::new(index));

            match map.entry(label) {
                hash_map::Entry::Occupied(occupied) => {
                    disjoint_sets.union_valid(*occupied.get(), index);
                },
                hash_map::Entry::Vacant(vacant) => {
                    vacant.insert(index);
                },
            }
        }

        disjoint_sets
    }

    /// Returns the amount of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Gives the root of the set that `index` belongs to.
    ///
    /// Each index of a set gives the same root. Every element visited on the way to the root
    /// is afterwards a direct child of the root, which keeps later lookups short.
    ///
    /// This method will be executed in `O(α(n))` amortized time where `α` is the inverse
    /// Ackermann function.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(3);
    ///
    /// assert!(disjoint_sets.find(1)? == 1);
    ///
    /// disjoint_sets.union(0, 1)?;
    ///
    /// assert!(disjoint_sets.find(0)? == 1);
    /// assert!(disjoint_sets.find(1)? == 1);
    /// assert!(disjoint_sets.find(3).is_err());
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn find(&self, index: usize) -> Result<usize, OutOfRange> {
        Ok(self.find_root(self.check(index)?))
    }

    /// Returns the parent of `index` in its tree.
    ///
    /// This is the root itself if `index` is a root.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(3);
    ///
    /// disjoint_sets.union(0, 1)?;
    /// disjoint_sets.union(1, 2)?;
    ///
    /// assert!(disjoint_sets.parent(0)? == 1);
    /// assert!(disjoint_sets.parent(2)? == 1);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn parent(&self, index: usize) -> Result<usize, OutOfRange> {
        Ok(self.meta[self.check(index)?].parent())
    }

    /// Returns `true` if `index` is the root of its set.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn is_root(&self, index: usize) -> Result<bool, OutOfRange> {
        Ok(self.meta[self.check(index)?].parent() == index)
    }

    /// Joins the sets of `first_index` and `second_index`.
    ///
    /// The root of the smaller set is attached below the root of the larger set.
    /// If both sets have the same size the root of `first_index` is attached below the root of
    /// `second_index`. Joining two indices that already share a set does nothing.
    ///
    /// This method will be executed in `O(α(n))` amortized time.
    ///
    /// # Errors
    ///
    /// If `first_index` or `second_index` is out of bounds, the sets are then left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(4);
    ///
    /// // All elements start out in their own sets.
    /// assert!(disjoint_sets.size_of(0)? == 1);
    /// assert!(disjoint_sets.size_of(1)? == 1);
    ///
    /// disjoint_sets.union(1, 2)?;
    ///
    /// // Now 1 and 2 share a set.
    /// assert!(disjoint_sets.size_of(1)? == 2);
    /// assert!(disjoint_sets.size_of(2)? == 2);
    ///
    /// disjoint_sets.union(3, 2)?;
    ///
    /// // We added 3 to the existing set with 1 and 2.
    /// assert!(disjoint_sets.size_of(3)? == 3);
    /// assert!(disjoint_sets.size_of(0)? == 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn union(&mut self, first_index: usize, second_index: usize) -> Result<(), OutOfRange> {
        let first_index = self.check(first_index)?;
        let second_index = self.check(second_index)?;

        self.union_valid(first_index, second_index);

        Ok(())
    }

    /// Returns `true` if `first_index` and `second_index` are in the same set.
    ///
    /// This compares the roots of both indices.
    ///
    /// # Errors
    ///
    /// If `first_index` or `second_index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(4);
    ///
    /// disjoint_sets.union(1, 3)?;
    /// disjoint_sets.union(0, 1)?;
    ///
    /// assert!(disjoint_sets.connected(0, 1)?);
    /// assert!(!disjoint_sets.connected(0, 2)?);
    /// assert!(disjoint_sets.connected(0, 3)?);
    /// assert!(!disjoint_sets.connected(1, 2)?);
    /// assert!(disjoint_sets.connected(1, 3)?);
    /// assert!(!disjoint_sets.connected(2, 3)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn connected(&self, first_index: usize, second_index: usize) -> Result<bool, OutOfRange> {
        Ok(self.find(first_index)? == self.find(second_index)?)
    }

    /// Returns the amount of elements in the set that `index` belongs to.
    ///
    /// The size is read from the root of the set so any member can be given.
    /// This method will be executed in `O(α(n))` amortized time.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(3);
    ///
    /// disjoint_sets.union(0, 2)?;
    ///
    /// assert!(disjoint_sets.size_of(0)? == 2);
    /// assert!(disjoint_sets.size_of(1)? == 1);
    /// assert!(disjoint_sets.size_of(2)? == 2);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn size_of(&self, index: usize) -> Result<usize, OutOfRange> {
        Ok(self.meta[self.find(index)?].size())
    }

    /// Returns `true` if `index` is the only element of its set.
    ///
    /// This will be done in `O(1)` time.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), forests::OutOfRange> {
    /// let mut disjoint_sets = forests::DisjointSets::new(4);
    ///
    /// disjoint_sets.union(1, 3)?;
    ///
    /// assert!(disjoint_sets.is_singleton(0)?);
    /// assert!(!disjoint_sets.is_singleton(1)?);
    /// assert!(disjoint_sets.is_singleton(2)?);
    /// assert!(!disjoint_sets.is_singleton(3)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn is_singleton(&self, index: usize) -> Result<bool, OutOfRange> {
        Ok(self.meta[self.check(index)?].link() == index)
    }

    /// Returns the amount of sets.
    ///
    /// This method will be executed in `O(n)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate forests;
    /// #
    /// # fn main() {
    /// let disjoint_sets = disjoint_sets![0, 1, 0, 1, 2];
    ///
    /// assert!(disjoint_sets.amount_of_sets() == 3);
    /// # }
    /// ```
    pub fn amount_of_sets(&self) -> usize {
        self.meta.iter()
            .enumerate()
            .filter(|(index, meta)| meta.parent() == *index)
            .count()
    }

    /// Returns an iterator over the elements of the set that `index` belongs to.
    ///
    /// The next element is found in `O(1)` time.
    /// The order the elements are returned in is not specified.
    ///
    /// # Errors
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate forests;
    /// #
    /// # fn main() {
    /// let disjoint_sets = disjoint_sets![
    ///     "first set",
    ///     "first set",
    ///     "second set",
    ///     "second set",
    /// ];
    ///
    /// let mut done = [0, 0, 0, 0];
    /// for index in disjoint_sets.set(0).unwrap() {
    ///     done[index] += 1;
    /// }
    /// for index in disjoint_sets.set(1).unwrap() {
    ///     done[index] += 1;
    /// }
    /// for index in disjoint_sets.set(2).unwrap() {
    ///     done[index] += 1;
    /// }
    /// // We visited the first set twice and the second set once.
    /// assert!(done == [2, 2, 1, 1]);
    /// # }
    /// ```
    #[inline]
    pub fn set(&self, index: usize) -> Result<Set, OutOfRange> {
        let root = self.find_final(self.check(index)?);

        Ok(Set {
            disjoint_sets: self,
            current: Some(root),
            root,
        })
    }

    /// Returns an iterator over all sets.
    ///
    /// The iterator returned yields `Set` iterators.
    /// The sets are returned in order by their first member.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate forests;
    /// #
    /// # fn main() {
    /// let disjoint_sets = disjoint_sets!['a', 'a', 'b', 'b', 'c', 'c'];
    ///
    /// for (number, set) in disjoint_sets.all_sets().enumerate() {
    ///     let mut count = 0;
    ///     for index in set {
    ///         assert!(index / 2 == number);
    ///         count += 1;
    ///     }
    ///     assert!(count == 2);
    /// }
    /// # }
    /// ```
    #[inline]
    pub fn all_sets(&self) -> AllSets {
        let len = self.len();

        AllSets {
            disjoint_sets: self,
            done: bit_vec![false; len],
            range: 0 .. len,
        }
    }

    /// Returns `Ok(index)` if `index` is in bounds.
    #[inline]
    fn check(&self, index: usize) -> Result<usize, OutOfRange> {
        OutOfRange::check(index, self.len())
    }

    /// Gives the root of `index`, updating the parent of every element on the way.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub(crate) fn find_root(&self, index: usize) -> usize {
        let parent = self.meta[index].parent();

        // If the node is its own parent we have found the root.
        if parent == index {
            index
        } else {
            // This method is recursive so each parent on the way to the root is updated.
            // Union by size keeps the trees below `log2(n)` high.
            let root = self.find_root(parent);

            self.meta[index].set_parent(root);

            root
        }
    }

    /// Gives the root of `index` without updating the parents.
    ///
    /// This should only be used if the parents will be updated immediately afterwards.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub(crate) fn find_final(&self, mut index: usize) -> usize {
        while index != self.meta[index].parent() {
            index = self.meta[index].parent();
        }

        index
    }

    /// Joins the sets of two indices that are known to be in bounds.
    fn union_valid(&mut self, first_index: usize, second_index: usize) {
        let i = self.find_root(first_index);
        let j = self.find_root(second_index);

        if i == j {
            return
        }

        // We swap the values of the links.
        let link_i = self.meta[i].link();
        let link_j = self.meta[j].link();
        self.meta[i].set_link(link_j);
        self.meta[j].set_link(link_i);

        let size_i = self.meta[i].size();
        let size_j = self.meta[j].size();

        // We add to the tree with the most elements.
        match Ord::cmp(&size_i, &size_j) {
            Ordering::Less | Ordering::Equal => {
                trace!("attaching root {} of size {} below root {} of size {}", i, size_i, j, size_j);
                self.meta[i].set_parent(j);
                self.meta[j].set_size(size_i + size_j);
            },
            Ordering::Greater => {
                trace!("attaching root {} of size {} below root {} of size {}", j, size_j, i, size_i);
                self.meta[j].set_parent(i);
                self.meta[i].set_size(size_i + size_j);
            },
        }
    }
}

impl Default for DisjointSets {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for DisjointSets {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // We map the roots to `usize` names.
        let mut map = HashMap::with_capacity(self.len());
        let mut builder = formatter.debug_map();
        let mut names = 0;

        for i in 0 .. self.len() {
            let root = self.find_root(i);

            let name = *map.entry(root).or_insert_with(|| {
                let new_name = names;
                names += 1;

                new_name
            });

            builder.entry(&i, &name);
        }

        builder.finish()
    }
}

impl PartialEq for DisjointSets {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false
        }

        // We map the roots of self to the roots of other.
        let mut map = HashMap::with_capacity(self.len());

        for i in 0 .. self.len() {
            let self_root = self.find_root(i);
            let other_root = other.find_root(i);

            match map.entry(self_root) {
                // If we have seen this root we check if we have the same map.
                hash_map::Entry::Occupied(occupied) => if *occupied.get() != other_root {
                    return false
                },
                // If we have not seen this root we add the relation to the map.
                hash_map::Entry::Vacant(vacant) => {
                    vacant.insert(other_root);
                },
            }
        }

        // Both partitions need the same amount of sets for the map to be a bijection.
        self.amount_of_sets() == other.amount_of_sets()
    }
}

impl Eq for DisjointSets {}

impl<L> std::iter::FromIterator<L> for DisjointSets where L: Hash + Eq {
    fn from_iter<I>(iter: I) -> Self where I: IntoIterator<Item = L> {
        Self::from_labels(iter)
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for DisjointSets {
    type Parameters = proptest::collection::SizeRange;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(size_range: Self::Parameters) -> Self::Strategy {
        (Vec::<usize>::arbitrary_with((size_range, ()))).prop_map(|set_numbers| {
            // Few trailing zeros are common so we get a couple of large sets.
            Self::from_labels(set_numbers.into_iter().map(usize::trailing_zeros))
        }).boxed()
    }
}

/// An iterator over a set in a `DisjointSets`.
///
/// This struct is created by the [`set`] method on [`DisjointSets`].
/// See its documentation for more.
///
/// [`set`]: struct.DisjointSets.html#method.set
/// [`DisjointSets`]: struct.DisjointSets.html
#[derive(Clone, Debug)]
pub struct Set<'a> {
    disjoint_sets: &'a DisjointSets,
    current: Option<usize>,
    root: usize,
}

impl<'a> Iterator for Set<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.current?;

        self.disjoint_sets.meta[current].set_parent(self.root);

        let next = self.disjoint_sets.meta[current].link();

        // We started at the root.
        self.current = if next == self.root {
            None
        } else {
            Some(next)
        };

        Some(current)
    }
}

impl<'a> FusedIterator for Set<'a> {}

/// An iterator over all sets in a `DisjointSets`.
///
/// This struct is created by the [`all_sets`] method on [`DisjointSets`].
/// See its documentation for more information.
///
/// [`all_sets`]: struct.DisjointSets.html#method.all_sets
/// [`DisjointSets`]: struct.DisjointSets.html
#[derive(Clone, Debug)]
pub struct AllSets<'a> {
    disjoint_sets: &'a DisjointSets,
    done: bit_vec::BitVec,
    range: ops::Range<usize>,
}

impl<'a> AllSets<'a> {
    /// Returns the set of `index` if it has not been returned yet.
    fn visit(&mut self, index: usize) -> Option<Set<'a>> {
        let root = self.disjoint_sets.find_final(index);

        if self.done.get(root)? {
            None
        } else {
            self.done.set(root, true);

            Some(Set {
                disjoint_sets: self.disjoint_sets,
                current: Some(root),
                root,
            })
        }
    }
}

impl<'a> Iterator for AllSets<'a> {
    type Item = Set<'a>;

    fn next(&mut self) -> Option<Set<'a>> {
        // We keep going until we find a set we have not returned yet.
        loop {
            let index = self.range.next()?;

            if let Some(set) = self.visit(index) {
                return Some(set)
            }
        }
    }
}

impl<'a> DoubleEndedIterator for AllSets<'a> {
    fn next_back(&mut self) -> Option<Set<'a>> {
        // We keep going until we find a set we have not returned yet.
        loop {
            let index = self.range.next_back()?;

            if let Some(set) = self.visit(index) {
                return Some(set)
            }
        }
    }
}

impl<'a> FusedIterator for AllSets<'a> {}
