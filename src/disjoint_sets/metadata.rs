use std::cell::Cell;

/// This provides additional information about a given element in the `DisjointSets`.
///
/// For each element in the `DisjointSets` we store a `Metadata`.
/// The fields are `Cell`s because path compression updates parents through a shared reference.
#[derive(Clone, Debug)]
pub(crate) struct Metadata {
    /// The parent of the element in its sets tree.
    /// These form an upside down tree where each child has the index of its parent.
    parent: Cell<usize>,
    /// A link to another index.
    /// These form a circular linked list in its set.
    link: Cell<usize>,
    /// The amount of elements in the tree below this element.
    /// Only meaningful while the element is a root.
    size: Cell<usize>,
}

impl Metadata {
    /// Create a new `Metadata` for an element with the given index.
    pub(crate) fn new(index: usize) -> Self {
        Self {
            parent: Cell::new(index),
            link: Cell::new(index),
            size: Cell::new(1),
        }
    }

    /// Return the `parent` variable.
    pub(crate) fn parent(&self) -> usize {
        self.parent.get()
    }

    /// Set the `parent` variable.
    pub(crate) fn set_parent(&self, value: usize) {
        self.parent.set(value);
    }

    /// Return the `link` variable.
    pub(crate) fn link(&self) -> usize {
        self.link.get()
    }

    /// Set the `link` variable.
    pub(crate) fn set_link(&self, value: usize) {
        self.link.set(value);
    }

    /// Return the `size` variable.
    pub(crate) fn size(&self) -> usize {
        self.size.get()
    }

    /// Set the `size` variable.
    pub(crate) fn set_size(&self, value: usize) {
        self.size.set(value);
    }
}
