/// An index was passed to a `DisjointSets` that does not belong to one of its elements.
///
/// A `DisjointSets` created with `len` elements accepts the indices `0 .. len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("index {index} is out of range for {len} elements")]
pub struct OutOfRange {
    /// The index that was given.
    pub index: usize,
    /// The amount of elements at the time of the call.
    pub len: usize,
}

impl OutOfRange {
    /// Returns `Ok(index)` if `index < len`.
    #[inline]
    pub(crate) fn check(index: usize, len: usize) -> Result<usize, Self> {
        if index < len {
            Ok(index)
        } else {
            Err(Self { index, len })
        }
    }
}
