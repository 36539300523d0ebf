//! LRU (Least Recently Used) replacement policy.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::{padded, EvictionPolicy, PolicyKind, StepOutcome};
use crate::common::{FrameCapacity, PageId};

/// An LRU eviction policy.
///
/// Recency is tracked with a logical clock: every reference stamps the page
/// with the next tick, and `order` keeps resident pages sorted by stamp. The
/// smallest stamp is the least recently used page.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Resident pages keyed by last-use tick (first = LRU, last = MRU).
    order: BTreeMap<u64, PageId>,

    /// Last-use tick of each resident page.
    stamps: HashMap<PageId, u64>,

    tick: u64,
    capacity: usize,
}

impl LruPolicy {
    /// Create an empty LRU policy.
    pub fn new(capacity: FrameCapacity) -> Self {
        Self {
            order: BTreeMap::new(),
            stamps: HashMap::with_capacity(capacity.get()),
            tick: 0,
            capacity: capacity.get(),
        }
    }

    /// The least recently used resident page.
    pub fn least_recent(&self) -> Option<PageId> {
        self.order.values().next().copied()
    }

    /// The most recently used resident page.
    pub fn most_recent(&self) -> Option<PageId> {
        self.order.values().next_back().copied()
    }

    /// Move `page` to the MRU end, admitting it if absent.
    fn touch(&mut self, page: PageId) {
        self.tick += 1;
        if let Some(old) = self.stamps.insert(page, self.tick) {
            self.order.remove(&old);
        }
        self.order.insert(self.tick, page);
    }
}

impl EvictionPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.stamps.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.stamps.contains_key(&page)
    }

    fn step(&mut self, page: PageId) -> StepOutcome {
        if self.stamps.contains_key(&page) {
            self.touch(page);
            return StepOutcome::Hit;
        }

        let mut evicted = None;
        if self.stamps.len() == self.capacity {
            if let Some((_, victim)) = self.order.pop_first() {
                self.stamps.remove(&victim);
                trace!(evicted = %victim, incoming = %page, "lru eviction");
                evicted = Some(victim);
            }
        }

        self.touch(page);
        StepOutcome::Fault { evicted }
    }

    fn frames(&self) -> Vec<Option<PageId>> {
        padded(self.order.values().copied(), self.capacity)
    }
}
