//! Configuration constants for pagesim.

/// Marker rendered in place of an empty frame slot.
///
/// Snapshots always carry exactly `capacity` slots; a slot with no resident
/// page is `None` in data and this marker when displayed.
pub const EMPTY_SLOT_MARKER: &str = "-";

/// Next-use position of a page that is never referenced again.
///
/// Optimal treats this as an infinite reuse distance, so it compares greater
/// than every real position in a reference sequence.
pub const NEVER: usize = usize::MAX;
