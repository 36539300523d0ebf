//! Page identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a page referenced by the workload.
///
/// Pages are opaque to every policy: only equality (membership) and hashing
/// are used to make decisions. Ordering exists for display and for
/// deterministic iteration in tests.
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page_id = PageId::new(42);
/// assert_eq!(page_id.0, 42);
/// assert_eq!(PageId::from(42), page_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }
}

impl From<u32> for PageId {
    #[inline]
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

/// Renders the bare number, the way reference strings are written.
impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_new() {
        let pid = PageId::new(42);
        assert_eq!(pid.0, 42);
    }

    #[test]
    fn test_page_id_ordering() {
        assert!(PageId::new(1) < PageId::new(2));
        assert!(PageId::new(5) > PageId::new(3));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(7)), "7");
    }

    #[test]
    fn test_page_id_serializes_as_number() {
        let json = serde_json::to_string(&PageId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
