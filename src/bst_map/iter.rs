//! The in-order iterators over a `BstMap<K, V>`.
//!
//! Each iterator keeps the path of nodes that are still to be returned on a stack,
//! so a step never takes more than `O(h)` time and never recurses.

use {
    std::iter::FusedIterator,
    crate::bst_map::node::{
        self,
        Link,
        Node,
    },
};

/// An iterator over the entries of a `BstMap<K, V>` in ascending order of their keys.
///
/// This struct is created by the [`iter`] method on [`BstMap<K, V>`].
/// See its documentation for more.
///
/// [`iter`]: struct.BstMap.html#method.iter
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct Iter<'a, K: 'a, V: 'a> {
    /// The nodes whose key is the next smallest are on top.
    front: Vec<&'a Node<K, V>>,
    /// The nodes whose key is the next largest are on top.
    back: Vec<&'a Node<K, V>>,
    /// The amount of entries not yet returned from either end.
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);
        iter.push_right(root);

        iter
    }

    fn push_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.front.push(&**node);
            link = &node.left;
        }
    }

    fn push_right(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.back.push(&**node);
            link = &node.right;
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        // The two ends meet when everything has been returned.
        if self.remaining == 0 {
            return None
        }

        let node = self.front.pop()?;
        self.push_left(&node.right);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None
        }

        let node = self.back.pop()?;
        self.push_right(&node.left);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the entries of a `BstMap<K, V>` that allows mutating the values.
///
/// This struct is created by the [`iter_mut`] method on [`BstMap<K, V>`].
///
/// [`iter_mut`]: struct.BstMap.html#method.iter_mut
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct IterMut<'a, K: 'a, V: 'a> {
    /// Every node on the stack is split into its key, its value and its right subtree.
    /// Its left subtree is either on the stack as well or already returned.
    stack: Vec<(&'a K, &'a mut V, &'a mut Link<K, V>)>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(root: &'a mut Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);

        iter
    }

    fn push_left(&mut self, mut link: &'a mut Link<K, V>) {
        while let Some(node) = link {
            let Node { key, value, left, right } = &mut **node;
            self.stack.push((&*key, value, right));
            link = left;
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        let (key, value, right) = self.stack.pop()?;
        self.push_left(right);
        self.remaining -= 1;

        Some((key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// An owning iterator over the entries of a `BstMap<K, V>` in ascending order of their keys.
///
/// This struct is created by the `into_iter` method on [`BstMap<K, V>`].
///
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct IntoIter<K, V> {
    /// The left subtrees of the nodes on the stack have been taken out.
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);

        iter
    }

    fn push_left(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        self.remaining -= 1;

        let Node { key, value, .. } = *node;

        Some((key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        while let Some(subtree) = self.stack.pop() {
            node::drop_tree(Some(subtree));
        }
    }
}

/// An iterator over the keys of a `BstMap<K, V>` in ascending order.
///
/// This struct is created by the [`keys`] method on [`BstMap<K, V>`].
/// Every call of `keys` gives a new iterator that starts at the smallest key.
///
/// [`keys`]: struct.BstMap.html#method.keys
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct Keys<'a, K: 'a, V: 'a> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Self { iter: self.iter.clone() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        Some(self.iter.next()?.0)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a K> {
        Some(self.iter.next_back()?.0)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of a `BstMap<K, V>` in ascending order of their keys.
///
/// This struct is created by the [`values`] method on [`BstMap<K, V>`].
///
/// [`values`]: struct.BstMap.html#method.values
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct Values<'a, K: 'a, V: 'a> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Self { iter: self.iter.clone() }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        Some(self.iter.next()?.1)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a V> {
        Some(self.iter.next_back()?.1)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// An iterator over the values of a `BstMap<K, V>` that allows mutating them.
///
/// This struct is created by the [`values_mut`] method on [`BstMap<K, V>`].
///
/// [`values_mut`]: struct.BstMap.html#method.values_mut
/// [`BstMap<K, V>`]: struct.BstMap.html
pub struct ValuesMut<'a, K: 'a, V: 'a> {
    pub(crate) iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        Some(self.iter.next()?.1)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}
