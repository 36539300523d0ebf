//! FIFO (First-In-First-Out) replacement policy.
//!
//! Evicts pages in the order they were admitted. Hits do not reorder the
//! queue, which is what makes FIFO subject to Belady's anomaly.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::{padded, EvictionPolicy, PolicyKind, StepOutcome};
use crate::common::{FrameCapacity, PageId};

/// A FIFO eviction policy.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Resident pages in admission order (front = oldest).
    queue: VecDeque<PageId>,

    /// Set for O(1) membership check.
    resident: HashSet<PageId>,

    capacity: usize,
}

impl FifoPolicy {
    /// Create an empty FIFO policy.
    pub fn new(capacity: FrameCapacity) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity.get()),
            resident: HashSet::with_capacity(capacity.get()),
            capacity: capacity.get(),
        }
    }

    /// The page that would be evicted next, if the set is full.
    pub fn oldest(&self) -> Option<PageId> {
        self.queue.front().copied()
    }
}

impl EvictionPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.resident.contains(&page)
    }

    fn step(&mut self, page: PageId) -> StepOutcome {
        if self.resident.contains(&page) {
            return StepOutcome::Hit;
        }

        let mut evicted = None;
        if self.queue.len() == self.capacity {
            if let Some(victim) = self.queue.pop_front() {
                self.resident.remove(&victim);
                trace!(evicted = %victim, incoming = %page, "fifo eviction");
                evicted = Some(victim);
            }
        }

        self.queue.push_back(page);
        self.resident.insert(page);
        StepOutcome::Fault { evicted }
    }

    fn frames(&self) -> Vec<Option<PageId>> {
        padded(self.queue.iter().copied(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fifo(capacity: usize) -> FifoPolicy {
        FifoPolicy::new(FrameCapacity::new(capacity).unwrap())
    }

    fn p(id: u32) -> PageId {
        PageId::new(id)
    }

    #[test]
    fn test_fifo_basic() {
        let mut policy = fifo(3);

        assert_eq!(policy.step(p(0)), StepOutcome::Fault { evicted: None });
        assert_eq!(policy.step(p(1)), StepOutcome::Fault { evicted: None });
        assert_eq!(policy.step(p(2)), StepOutcome::Fault { evicted: None });
        assert_eq!(policy.len(), 3);

        // Full: evicts in admission order
        assert_eq!(policy.step(p(3)), StepOutcome::Fault { evicted: Some(p(0)) });
        assert_eq!(policy.step(p(4)), StepOutcome::Fault { evicted: Some(p(1)) });
        assert_eq!(policy.frames(), vec![Some(p(2)), Some(p(3)), Some(p(4))]);
    }

    #[test]
    fn test_fifo_hit_does_not_reorder() {
        let mut policy = fifo(2);

        policy.step(p(0));
        policy.step(p(1));
        assert_eq!(policy.step(p(0)), StepOutcome::Hit); // Access again - should NOT reorder

        // Page 0 was admitted first, so it goes first
        assert_eq!(policy.oldest(), Some(p(0)));
        assert_eq!(policy.step(p(2)), StepOutcome::Fault { evicted: Some(p(0)) });
    }

    #[test]
    fn test_fifo_partial_snapshot() {
        let mut policy = fifo(3);
        policy.step(p(9));
        assert_eq!(policy.frames(), vec![Some(p(9)), None, None]);
    }

    #[test]
    fn test_fifo_readmits_evicted_page() {
        let mut policy = fifo(1);
        policy.step(p(1));
        policy.step(p(2));
        assert!(!policy.contains(p(1)));
        assert_eq!(policy.step(p(1)), StepOutcome::Fault { evicted: Some(p(2)) });
    }
}
