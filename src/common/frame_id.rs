//! Frame slot identifier type.

use std::fmt;

/// Identifies one slot of the frame set.
///
/// Using `usize` so it indexes slot arrays directly: `slots[frame_id.0]`.
/// Clock advances its hand over these; snapshots are laid out by them.
///
/// # Example
/// ```
/// use pagesim::FrameId;
///
/// let frame_id = FrameId::new(2);
/// assert_eq!(frame_id.next(3), FrameId::new(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The slot after this one on a ring of `capacity` slots.
    #[inline]
    pub fn next(self, capacity: usize) -> Self {
        FrameId((self.0 + 1) % capacity)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
