//! The nodes of a `BstMap<K, V>` and the walks over them.
//!
//! Every walk uses a loop or an explicit stack instead of recursion,
//! a tree built from sorted keys is as deep as it is long.

use {
    std::{
        borrow::Borrow,
        cmp::Ordering,
    },
    log::trace,
};

/// A subtree, owned by its parent node or by the map for the root.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// All keys below are smaller than `key`.
    pub(crate) left: Link<K, V>,
    /// All keys below are larger than `key`.
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Returns the node with the given key.
pub(crate) fn search<'a, K, V, Q>(mut link: &'a Link<K, V>, key: &Q) -> Option<&'a Node<K, V>> where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(node) = link {
        link = match key.cmp(node.key.borrow()) {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return Some(&**node),
        };
    }

    None
}

/// Returns the link that holds the node with the given key.
///
/// If there is no such node this is the empty link where a node with this key belongs.
pub(crate) fn seek<'a, K, V, Q>(mut link: &'a mut Link<K, V>, key: &Q) -> &'a mut Link<K, V> where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    loop {
        let ordering = link.as_ref().map(|node| key.cmp(node.key.borrow()));

        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, link) => return link,
        };
    }
}

/// Takes the node out of `link` and puts a subtree with the remaining nodes in its place.
///
/// A node with at most one child is replaced by that child.
/// A node with two children is replaced by the smallest node of its right subtree,
/// which takes over both subtrees (Hibbard deletion).
///
/// The returned node has no children.
pub(crate) fn detach<K, V>(link: &mut Link<K, V>) -> Link<K, V> {
    let mut node = link.take()?;

    *link = match (node.left.take(), node.right.take()) {
        (None, right) => right,
        (left, None) => left,
        (left, Some(right)) => {
            let mut rest = Some(right);

            match detach_min(&mut rest) {
                Some(mut successor) => {
                    trace!("promoting the in-order successor of a node with two children");
                    successor.left = left;
                    successor.right = rest;

                    Some(successor)
                },
                None => left,
            }
        },
    };

    Some(node)
}

/// Takes the smallest node out of the subtree in `link`.
///
/// Its right subtree takes its place. The returned node has no children.
pub(crate) fn detach_min<K, V>(mut link: &mut Link<K, V>) -> Link<K, V> {
    while link.as_ref().map_or(false, |node| node.left.is_some()) {
        link = match link {
            Some(node) => &mut node.left,
            None => break,
        };
    }

    let mut min = link.take()?;
    *link = min.right.take();

    Some(min)
}

/// Takes the largest node out of the subtree in `link`.
///
/// Its left subtree takes its place. The returned node has no children.
pub(crate) fn detach_max<K, V>(mut link: &mut Link<K, V>) -> Link<K, V> {
    while link.as_ref().map_or(false, |node| node.right.is_some()) {
        link = match link {
            Some(node) => &mut node.right,
            None => break,
        };
    }

    let mut max = link.take()?;
    *link = max.left.take();

    Some(max)
}

/// Returns the leftmost node below `link`.
pub(crate) fn min<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let mut node = link.as_deref()?;

    while let Some(left) = node.left.as_deref() {
        node = left;
    }

    Some(node)
}

/// Returns the rightmost node below `link`.
pub(crate) fn max<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let mut node = link.as_deref()?;

    while let Some(right) = node.right.as_deref() {
        node = right;
    }

    Some(node)
}

/// The amount of nodes on the longest path from `link` down to a leaf.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    let mut height = 0;
    let mut stack: Vec<(&Node<K, V>, usize)> = link.iter().map(|node| (&**node, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        height = usize::max(height, depth);

        for child in node.left.iter().chain(node.right.iter()) {
            stack.push((&**child, depth + 1));
        }
    }

    height
}

/// Clones the subtree in `link`, keeping its shape.
pub(crate) fn clone_tree<K, V>(link: &Link<K, V>) -> Link<K, V> where
    K: Clone,
    V: Clone,
{
    enum Step<'a, K, V> {
        Enter(&'a Link<K, V>),
        Exit(&'a Node<K, V>),
    }

    let mut steps = vec![Step::Enter(link)];
    // The clones of the subtrees we finished, the right subtree is on top of the left one.
    let mut done: Vec<Link<K, V>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(None) => done.push(None),
            Step::Enter(Some(node)) => {
                steps.push(Step::Exit(&**node));
                steps.push(Step::Enter(&node.right));
                steps.push(Step::Enter(&node.left));
            },
            Step::Exit(node) => {
                let right = done.pop().flatten();
                let left = done.pop().flatten();

                done.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    left,
                    right,
                })));
            },
        }
    }

    done.pop().flatten()
}

/// Drops the subtree in `link` one node at a time.
pub(crate) fn drop_tree<K, V>(link: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = link.into_iter().collect();

    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
