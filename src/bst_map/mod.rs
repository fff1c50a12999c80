//! An ordered map backed by an unbalanced [binary search tree].
//!
//! See [`BstMap<K, V>`] for more information.
//!
//! [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
//! [`BstMap<K, V>`]: struct.BstMap.html

mod node;
mod iter;

use {
    std::{
        ops,
        fmt,
        mem,
        borrow::Borrow,
        collections::BTreeSet,
        iter::FromIterator,
    },
    log::debug,
    self::node::{
        Link,
        Node,
    },
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

pub use self::iter::{Iter, IterMut, IntoIter, Keys, Values, ValuesMut};

/// An ordered map stored in a binary search tree.
///
/// Every key is stored in its own node. All keys in the left subtree of a node are smaller
/// than the key of the node and all keys in its right subtree are larger.
/// The tree is never rebalanced, its shape only depends on the order the keys were inserted
/// in. Operations take `O(h)` time where `h` is the height of the tree: `O(log n)` expected
/// for keys inserted in random order and `n` for keys inserted in sorted order.
///
/// The methods follow those of `BTreeMap<K, V>`. Iteration is in ascending order of the keys.
///
/// # Examples
///
/// ```
/// use forests::BstMap;
///
/// let mut symbols = BstMap::new();
/// symbols.insert("fn", 0);
/// symbols.insert("let", 1);
/// symbols.insert("match", 2);
///
/// assert!(symbols.len() == 3);
/// assert!(symbols.get("let") == Some(&1));
/// assert!(symbols.get("loop") == None);
///
/// symbols.insert("let", 3);
/// assert!(symbols.len() == 3);
/// assert!(symbols.remove("fn") == Some(0));
///
/// let keys: Vec<_> = symbols.keys().cloned().collect();
/// assert!(keys == ["let", "match"]);
/// ```
pub struct BstMap<K, V> {
    root: Link<K, V>,
    /// The amount of nodes below `root`.
    len: usize,
}

/// Creates a [`BstMap`] containing the given entries.
///
/// ```
/// # #[macro_use]
/// # extern crate forests;
/// #
/// # fn main() {
/// let map = bst_map! {
///     5 => 'e',
///     3 => 'c',
///     8 => 'h',
/// };
///
/// assert!(map.len() == 3);
/// assert!(map[&8] == 'h');
/// # }
/// ```
///
/// [`BstMap`]: bst_map/struct.BstMap.html
#[macro_export]
macro_rules! bst_map {
    ($($key: expr => $value: expr),*) => {
        {
            let mut map = $crate::BstMap::new();

            $(
                map.insert($key, $value);
            )*

            map
        }
    };
    ($($key: expr => $value: expr,)*) => {
        $crate::bst_map!{$($key => $value),*}
    };
}

impl<K, V> BstMap<K, V> {
    /// Constructs a new, empty `BstMap<K, V>`.
    ///
    /// This does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
        }
    }

    /// Returns the amount of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert!(!map.contains_key(&1));
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing a map of {} entries", self.len);

        node::drop_tree(self.root.take());
        self.len = 0;
    }

    /// Returns the amount of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// assert!(map.height() == 0);
    ///
    /// map.extend(vec![(2, ()), (1, ()), (3, ())]);
    /// assert!(map.height() == 2);
    ///
    /// // Sorted keys give a tree that is a single path.
    /// map.extend((4 .. 10).map(|key| (key, ())));
    /// assert!(map.height() == 8);
    /// ```
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// assert!(map.first_key_value() == None);
    ///
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert!(map.first_key_value() == Some((&1, &'a')));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = node::min(&self.root)?;

        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = node::max(&self.root)?;

        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// The right subtree of the removed node takes its place.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: forests::BstMap<_, _> = vec![(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// assert!(map.pop_first() == Some((1, 'a')));
    /// assert!(map.pop_first() == Some((2, 'b')));
    /// assert!(map.len() == 1);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = node::detach_min(&mut self.root)?;

        Some(self.unlink(node))
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// The left subtree of the removed node takes its place.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = node::detach_max(&mut self.root)?;

        Some(self.unlink(node))
    }

    /// Gets an iterator over the entries, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert(3, 'c');
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert!(entries == [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    ///
    /// let (last_key, _) = map.iter().next_back().unwrap();
    /// assert!(*last_key == 3);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Gets an iterator over the entries, sorted by key, with mutable references to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// for (_key, value) in map.iter_mut() {
    ///     *value *= 10;
    /// }
    ///
    /// assert!(map["a"] == 10);
    /// assert!(map["b"] == 20);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        IterMut::new(&mut self.root, self.len)
    }

    /// Gets an iterator over the keys in ascending order.
    ///
    /// A new iterator has to be requested to go over the keys again.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// for &key in &[5, 3, 8, 1, 4, 7, 9] {
    ///     map.insert(key, ());
    /// }
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert!(keys == [1, 3, 4, 5, 7, 8, 9]);
    /// ```
    #[inline]
    pub fn keys(&self) -> Keys<K, V> {
        Keys { iter: self.iter() }
    }

    /// Gets an iterator over the values, sorted by their keys.
    #[inline]
    pub fn values(&self) -> Values<K, V> {
        Values { iter: self.iter() }
    }

    /// Gets an iterator over mutable references to the values, sorted by their keys.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<K, V> {
        ValuesMut { iter: self.iter_mut() }
    }

    /// Returns the key and value of a node taken out of the tree.
    fn unlink(&mut self, node: Box<Node<K, V>>) -> (K, V) {
        self.len -= 1;

        let Node { key, value, .. } = *node;

        (key, value)
    }
}

impl<K, V> BstMap<K, V> where
    K: Ord,
{
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type.
    /// Returns `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert(String::from("one"), 1);
    ///
    /// assert!(map.get("one") == Some(&1));
    /// assert!(map.get("two") == None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V> where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Some(&node::search(&self.root, key)?.value)
    }

    /// Returns the key and value corresponding to the key.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)> where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = node::search(&self.root, key)?;

        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert(1, "a");
    ///
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value = "b";
    /// }
    /// assert!(map[&1] == "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V> where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::seek(&mut self.root, key).as_mut().map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains a value for the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search(&self.root, key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key, a new leaf is added and `None` is returned.
    ///
    /// If the map did have this key, the value is updated in place and the old value is
    /// returned. The key and the shape of the tree are not changed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    ///
    /// assert!(map.insert(37, "a") == None);
    /// assert!(map.insert(37, "b") == Some("a"));
    /// assert!(map.len() == 1);
    /// assert!(map[&37] == "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let link = node::seek(&mut self.root, &key);

        match link {
            Some(node) => Some(mem::replace(&mut node.value, value)),
            None => {
                *link = Some(Box::new(Node::new(key, value)));
                self.len += 1;

                None
            },
        }
    }

    /// Removes a key from the map, returning its value if the key was present.
    ///
    /// A node with two children is replaced by the node with the next larger key,
    /// which is taken out of the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// for &key in &[5, 3, 8, 1, 4, 7, 9] {
    ///     map.insert(key, key * 10);
    /// }
    ///
    /// assert!(map.remove(&5) == Some(50));
    /// assert!(map.remove(&5) == None);
    /// assert!(map.len() == 6);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V> where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Some(self.remove_entry(key)?.1)
    }

    /// Removes a key from the map, returning the stored key and value if the key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)> where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = node::detach(node::seek(&mut self.root, key))?;

        Some(self.unlink(node))
    }

    /// Returns the set of all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = forests::BstMap::new();
    /// map.insert('b', 2);
    /// map.insert('a', 1);
    ///
    /// let key_set = map.key_set();
    /// assert!(key_set.len() == 2);
    /// assert!(key_set.contains(&'a'));
    /// ```
    pub fn key_set(&self) -> BTreeSet<&K> {
        self.keys().collect()
    }
}

impl<K, V> Drop for BstMap<K, V> {
    fn drop(&mut self) {
        node::drop_tree(self.root.take());
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for BstMap<K, V> where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: node::clone_tree(&self.root),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for BstMap<K, V> where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for BstMap<K, V> where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for BstMap<K, V> where
    K: Eq,
    V: Eq,
{}

impl<'a, K, Q, V> ops::Index<&'a Q> for BstMap<K, V> where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// If the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V> Extend<(K, V)> for BstMap<K, V> where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I) where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> Extend<(&'a K, &'a V)> for BstMap<K, V> where
    K: Ord + Copy + 'a,
    V: Copy + 'a,
{
    fn extend<I>(&mut self, iter: I) where
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        for (&key, &value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BstMap<K, V> where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.extend(iter);

        map
    }
}

impl<K, V> IntoIterator for BstMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.root.take(), mem::replace(&mut self.len, 0))
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BstMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

#[cfg(feature = "rayon")]
impl<K, V> FromParallelIterator<(K, V)> for BstMap<K, V> where
    K: Ord + Send,
    V: Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.par_extend(par_iter);

        map
    }
}

#[cfg(feature = "rayon")]
impl<K, V> ParallelExtend<(K, V)> for BstMap<K, V> where
    K: Ord + Send,
    V: Send,
{
    fn par_extend<I>(&mut self, par_iter: I) where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        // The entries are produced in parallel but the tree is built by this thread,
        // in the order of the parallel iterator.
        let entries: Vec<(K, V)> = par_iter.into_par_iter().collect();

        self.extend(entries);
    }
}

#[cfg(feature = "rayon")]
impl<K, V> IntoParallelIterator for BstMap<K, V> where
    K: Send,
    V: Send,
{
    type Item = (K, V);
    type Iter = rayon::vec::IntoIter<(K, V)>;

    fn into_par_iter(self) -> Self::Iter {
        self.into_iter().collect::<Vec<_>>().into_par_iter()
    }
}

#[cfg(feature = "rayon")]
impl<'a, K, V> IntoParallelIterator for &'a BstMap<K, V> where
    K: Sync,
    V: Sync,
{
    type Item = (&'a K, &'a V);
    type Iter = rayon::vec::IntoIter<(&'a K, &'a V)>;

    fn into_par_iter(self) -> Self::Iter {
        self.iter().collect::<Vec<_>>().into_par_iter()
    }
}

#[cfg(feature = "proptest")]
impl<K, V> Arbitrary for BstMap<K, V> where
    K: Arbitrary + Ord,
    V: Arbitrary,
    K::Strategy: 'static,
    V::Strategy: 'static,
{
    type Parameters = (proptest::collection::SizeRange, K::Parameters, V::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (size_range, key_params, value_params) = params;
        let params = (size_range, (key_params, value_params));

        // The order of the entries decides the shape of the tree.
        (Vec::<(K, V)>::arbitrary_with(params)).prop_map(|entries| {
            entries.into_iter().collect()
        }).boxed()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{
            fmt::Debug,
            collections::BTreeMap,
        },
    };
    #[cfg(feature = "rayon")]
    use rayon::prelude::*;
    #[cfg(feature = "proptest")]
    use proptest::prelude::*;

    /// Checks the order of the keys in every subtree and the amount of nodes.
    fn assert_valid<K, V>(map: &BstMap<K, V>) where
        K: Ord + Copy + Debug,
    {
        let mut stack: Vec<(&Node<K, V>, Option<K>, Option<K>)> = map.root.iter()
            .map(|node| (&**node, None, None))
            .collect();
        let mut count = 0;

        while let Some((node, lower, upper)) = stack.pop() {
            count += 1;

            if let Some(lower) = lower {
                assert!(lower < node.key, "{:?} is not above {:?}", node.key, lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < upper, "{:?} is not below {:?}", node.key, upper);
            }

            if let Some(left) = &node.left {
                stack.push((&**left, lower, Some(node.key)));
            }
            if let Some(right) = &node.right {
                stack.push((&**right, Some(node.key), upper));
            }
        }

        assert_eq!(count, map.len());
    }

    fn root_key<K: Copy, V>(map: &BstMap<K, V>) -> Option<K> {
        map.root.as_ref().map(|node| node.key)
    }

    #[test]
    fn insert_get_and_overwrite() {
        let mut map = BstMap::new();

        assert_eq!(map.get(&1), None);
        assert_eq!(map.insert(1, "one"), None);
        assert_eq!(map.insert(2, "two"), None);
        assert_eq!(map.len(), 2);

        assert_eq!(map.insert(1, "uno"), Some("one"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"uno"));
        assert_eq!(root_key(&map), Some(1));
        assert_valid(&map);
    }

    #[test]
    fn remove_absent_key() {
        let mut map = bst_map! { 2 => 'b', 1 => 'a' };

        assert_eq!(map.remove(&3), None);
        assert_eq!(map.len(), 2);

        let mut empty: BstMap<i32, char> = BstMap::new();
        assert_eq!(empty.remove(&3), None);
        assert_eq!(empty.pop_first(), None);
        assert_eq!(empty.pop_last(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn remove_node_with_two_children() {
        crate::init_logger();
        let mut map = BstMap::new();
        for &key in &[5, 3, 8, 1, 4, 7, 9] {
            map.insert(key, key * 10);
        }

        assert_eq!(map.remove(&5), Some(50));
        assert_eq!(map.len(), 6);
        assert_valid(&map);

        // The smallest key of the right subtree took the place of the root.
        assert_eq!(root_key(&map), Some(7));
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
        for &key in &[1, 3, 4, 7, 8, 9] {
            assert_eq!(map.get(&key), Some(&(key * 10)));
        }
    }

    #[test]
    fn remove_nodes_with_one_child_and_leaves() {
        let mut map: BstMap<_, _> = vec![(5, ()), (3, ()), (1, ()), (8, ()), (9, ())]
            .into_iter()
            .collect();

        // 3 only has a left child and 8 only has a right child.
        assert_eq!(map.remove(&3), Some(()));
        assert_valid(&map);
        assert_eq!(map.remove(&8), Some(()));
        assert_valid(&map);
        assert_eq!(map.remove(&9), Some(()));
        assert_valid(&map);
        assert_eq!(map.remove(&5), Some(()));
        assert_valid(&map);

        assert_eq!(root_key(&map), Some(1));
        assert_eq!(map.remove(&1), Some(()));
        assert!(map.is_empty());
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn successor_deep_in_right_subtree() {
        let mut map = BstMap::new();
        for &key in &[10, 5, 20, 15, 25, 12, 17, 13] {
            map.insert(key, ());
        }

        // The successor 12 has a right child that moves up to its place.
        map.remove(&10);
        assert_eq!(root_key(&map), Some(12));
        assert_valid(&map);
        assert!(map.contains_key(&13));
        assert_eq!(map.remove_entry(&13), Some((13, ())));
        assert_valid(&map);
    }

    #[test]
    fn clear() {
        crate::init_logger();
        let mut map = bst_map! { 'a' => 1, 'b' => 2, 'c' => 3 };
        map.clear();

        assert_eq!(map.len(), 0);
        for key in &['a', 'b', 'c'] {
            assert!(!map.contains_key(key));
        }

        map.insert('d', 4);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn key_set_and_iteration_order() {
        let map: BstMap<_, _> = vec![(4, 'd'), (2, 'b'), (6, 'f'), (1, 'a'), (3, 'c')]
            .into_iter()
            .collect();

        let key_set = map.key_set();
        assert_eq!(key_set.into_iter().cloned().collect::<Vec<_>>(), vec![1, 2, 3, 4, 6]);

        assert_eq!(map.values().cloned().collect::<String>(), "abcdf");
        assert_eq!(map.keys().rev().cloned().collect::<Vec<_>>(), vec![6, 4, 3, 2, 1]);

        // Both ends meet in the middle without repeating an entry.
        let mut iter = map.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some((&1, &'a')));
        assert_eq!(iter.next_back(), Some((&6, &'f')));
        assert_eq!(iter.next_back(), Some((&4, &'d')));
        assert_eq!(iter.next(), Some((&2, &'b')));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next_back(), Some((&3, &'c')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        // A fresh iterator starts over.
        assert_eq!(map.keys().count(), 5);
        assert_eq!(map.keys().next(), Some(&1));
    }

    #[test]
    fn mutable_and_owning_iteration() {
        let mut map: BstMap<_, _> = (0 .. 10).rev().map(|key| (key, key)).collect();

        for value in map.values_mut() {
            *value *= 2;
        }
        for (key, value) in &mut map {
            *value += key;
        }
        assert_eq!(map[&4], 12);

        let entries: Vec<_> = map.clone().into_iter().collect();
        assert_eq!(entries, (0 .. 10).map(|key| (key, key * 3)).collect::<Vec<_>>());

        // Dropping a partly consumed iterator drops the rest.
        let mut into_iter = map.into_iter();
        assert_eq!(into_iter.next(), Some((0, 0)));
        assert_eq!(into_iter.len(), 9);
    }

    #[test]
    fn first_and_last() {
        let mut map = bst_map! { 3 => 'c', 1 => 'a', 5 => 'e', 4 => 'd' };

        assert_eq!(map.first_key_value(), Some((&1, &'a')));
        assert_eq!(map.last_key_value(), Some((&5, &'e')));
        assert_eq!(map.pop_last(), Some((5, 'e')));
        assert_valid(&map);
        assert_eq!(map.pop_first(), Some((1, 'a')));
        assert_valid(&map);
        assert_eq!(map.last_key_value(), Some((&4, &'d')));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn borrowed_lookups() {
        let mut map = BstMap::new();
        map.insert(String::from("beta"), 2);
        map.insert(String::from("alpha"), 1);

        assert_eq!(map.get("alpha"), Some(&1));
        assert_eq!(map.get_key_value("beta"), Some((&String::from("beta"), &2)));
        assert_eq!(map["beta"], 2);
        *map.get_mut("beta").unwrap() = 3;
        assert_eq!(map.remove("beta"), Some(3));
        assert!(map.get_mut("beta").is_none());
        assert_eq!(format!("{:?}", map), r#"{"alpha": 1}"#);
    }

    #[test]
    fn equality_ignores_shape() {
        let first: BstMap<_, _> = vec![(1, ()), (2, ()), (3, ())].into_iter().collect();
        let second: BstMap<_, _> = vec![(2, ()), (3, ()), (1, ())].into_iter().collect();

        assert_ne!(first.height(), second.height());
        assert_eq!(first, second);
        assert_ne!(first, BstMap::default());
    }

    #[test]
    fn sorted_insertion_degenerates() {
        let len = 10_000;
        let mut map = BstMap::new();
        for key in 0 .. len {
            map.insert(key, key);
        }

        assert_eq!(map.height(), len);
        assert_eq!(map.get(&(len - 1)), Some(&(len - 1)));
        assert!(map.iter().map(|(key, _)| *key).eq(0 .. len));

        let clone = map.clone();
        assert_eq!(clone.height(), len);
        assert_eq!(clone, map);

        assert_eq!(map.remove(&(len - 1)), Some(len - 1));
        assert_eq!(map.pop_first(), Some((0, 0)));
        assert_eq!(map.len(), len - 2);
        drop(map);

        let mut into_iter = clone.into_iter();
        assert_eq!(into_iter.len(), len);
        assert_eq!(into_iter.nth(len / 2), Some((len / 2, len / 2)));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_iterators() {
        let map: BstMap<u32, u32> = (0 .. 1000u32).into_par_iter().map(|key| (key, key * key)).collect();

        assert_eq!(map.len(), 1000);
        assert_valid(&map);

        let sum: u64 = (&map).into_par_iter().map(|(_, &value)| u64::from(value)).sum();
        assert_eq!(sum, (0 .. 1000u64).map(|key| key * key).sum::<u64>());

        let keys: Vec<u32> = map.par_iter().map(|(&key, _)| key).collect();
        assert_eq!(keys, (0 .. 1000).collect::<Vec<_>>());

        let entries: Vec<(u32, u32)> = map.into_par_iter().collect();
        assert_eq!(entries.len(), 1000);
    }

    #[cfg(feature = "proptest")]
    #[derive(Clone, Debug)]
    enum Operation {
        Insert(u8, u16),
        Remove(u8),
        PopFirst,
        PopLast,
        Clear,
    }

    #[cfg(feature = "proptest")]
    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            8 => (any::<u8>(), any::<u16>()).prop_map(|(key, value)| Operation::Insert(key, value)),
            4 => any::<u8>().prop_map(Operation::Remove),
            1 => Just(Operation::PopFirst),
            1 => Just(Operation::PopLast),
            1 => Just(Operation::Clear),
        ]
    }

    #[cfg(feature = "proptest")]
    proptest! {
        #[test]
        fn operations_agree_with_btree_map(
            operations in proptest::collection::vec(operation(), 0 .. 200)
        ) {
            let mut map = BstMap::new();
            let mut model = BTreeMap::new();

            for operation in operations {
                match operation {
                    Operation::Insert(key, value) => {
                        prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                    },
                    Operation::Remove(key) => {
                        prop_assert_eq!(map.remove(&key), model.remove(&key));
                    },
                    Operation::PopFirst => {
                        let expected = model.keys().next().cloned();
                        let expected = expected.map(|key| (key, model.remove(&key).unwrap()));
                        prop_assert_eq!(map.pop_first(), expected);
                    },
                    Operation::PopLast => {
                        let expected = model.keys().next_back().cloned();
                        let expected = expected.map(|key| (key, model.remove(&key).unwrap()));
                        prop_assert_eq!(map.pop_last(), expected);
                    },
                    Operation::Clear => {
                        map.clear();
                        model.clear();
                    },
                }

                prop_assert_eq!(map.len(), model.len());
            }

            assert_valid(&map);
            prop_assert!(map.iter().eq(model.iter()));
            for key in 0 ..= u8::MAX {
                prop_assert_eq!(map.get(&key), model.get(&key));
                prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
            }
        }

        #[test]
        fn removing_every_key_empties_the_map(map in any::<BstMap<u8, u8>>()) {
            let mut map = map;
            let keys: Vec<u8> = map.keys().cloned().collect();
            let height = map.height();
            prop_assert!(height <= map.len());

            for (removed, key) in keys.iter().enumerate() {
                prop_assert!(map.remove(key).is_some());
                prop_assert_eq!(map.len(), keys.len() - removed - 1);
                prop_assert!(!map.contains_key(key));
                assert_valid(&map);
            }

            prop_assert!(map.is_empty());
        }

        #[test]
        fn clones_keep_the_shape(map in any::<BstMap<u8, u8>>()) {
            let clone = map.clone();

            prop_assert_eq!(clone.height(), map.height());
            prop_assert_eq!(root_key(&clone), root_key(&map));
            prop_assert_eq!(&clone, &map);
        }
    }
}
