//! Reference sequence: the simulation input.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::common::PageId;

/// An ordered, immutable list of page references.
///
/// Fully materialized up front: Optimal looks ahead over the whole
/// remainder, so there is no streaming form. Dereferences to `[PageId]`.
///
/// # Example
/// ```
/// use pagesim::ReferenceSequence;
///
/// let seq = ReferenceSequence::from(vec![7, 0, 1, 2, 0]);
/// assert_eq!(seq.len(), 5);
/// assert_eq!(seq.distinct_pages(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSequence(Vec<PageId>);

impl ReferenceSequence {
    /// Wrap an existing list of references.
    pub fn new(pages: Vec<PageId>) -> Self {
        ReferenceSequence(pages)
    }

    /// The references as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[PageId] {
        &self.0
    }

    /// Number of distinct pages referenced.
    ///
    /// This is the minimum possible fault count for any demand-paging policy.
    pub fn distinct_pages(&self) -> usize {
        self.0.iter().collect::<HashSet<_>>().len()
    }
}

impl Deref for ReferenceSequence {
    type Target = [PageId];

    fn deref(&self) -> &[PageId] {
        &self.0
    }
}

impl From<Vec<PageId>> for ReferenceSequence {
    fn from(pages: Vec<PageId>) -> Self {
        ReferenceSequence(pages)
    }
}

impl From<Vec<u32>> for ReferenceSequence {
    fn from(ids: Vec<u32>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<&[u32]> for ReferenceSequence {
    fn from(ids: &[u32]) -> Self {
        ids.iter().copied().collect()
    }
}

impl FromIterator<PageId> for ReferenceSequence {
    fn from_iter<I: IntoIterator<Item = PageId>>(iter: I) -> Self {
        ReferenceSequence(iter.into_iter().collect())
    }
}

impl FromIterator<u32> for ReferenceSequence {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        iter.into_iter().map(PageId::new).collect()
    }
}

impl<'a> IntoIterator for &'a ReferenceSequence {
    type Item = &'a PageId;
    type IntoIter = std::slice::Iter<'a, PageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
