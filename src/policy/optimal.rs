//! Optimal (Belady's MIN) replacement policy.
//!
//! On a fault with a full frame set, evicts the resident page whose next
//! reference lies farthest in the future; a page never referenced again is
//! infinitely far. Requires the whole reference sequence up front, so it is
//! only usable offline as a lower bound on fault count.

use std::collections::HashMap;

use tracing::trace;

use super::{padded, EvictionPolicy, PolicyKind, StepOutcome};
use crate::common::config::NEVER;
use crate::common::{FrameCapacity, PageId};

/// Belady's optimal eviction policy.
///
/// Instead of rescanning the remaining sequence on every fault, the
/// constructor precomputes, for each position, the position of the next
/// reference to the same page. Each resident slot remembers the next use of
/// its page, refreshed on every hit.
#[derive(Debug, Clone)]
pub struct OptimalPolicy {
    /// The sequence this policy will be stepped over.
    pages: Vec<PageId>,

    /// `next_use[i]` is the next position after `i` referencing `pages[i]`,
    /// or [`NEVER`].
    next_use: Vec<usize>,

    /// Position of the next reference to be stepped.
    cursor: usize,

    /// Resident pages in slot order. A new page takes its victim's slot.
    slots: Vec<PageId>,

    /// Next use of the page in each slot (parallel to `slots`).
    slot_next_use: Vec<usize>,

    /// Slot index of each resident page.
    slot_of: HashMap<PageId, usize>,

    capacity: usize,
}

impl OptimalPolicy {
    /// Create an empty Optimal policy for `sequence`.
    pub fn new(capacity: FrameCapacity, sequence: &[PageId]) -> Self {
        let mut next_use = vec![NEVER; sequence.len()];
        let mut seen: HashMap<PageId, usize> = HashMap::new();
        for (pos, &page) in sequence.iter().enumerate().rev() {
            if let Some(later) = seen.insert(page, pos) {
                next_use[pos] = later;
            }
        }

        Self {
            pages: sequence.to_vec(),
            next_use,
            cursor: 0,
            slots: Vec::with_capacity(capacity.get()),
            slot_next_use: Vec::with_capacity(capacity.get()),
            slot_of: HashMap::with_capacity(capacity.get()),
            capacity: capacity.get(),
        }
    }

    /// Number of references stepped so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Slot holding the page with the farthest next use.
    ///
    /// Ties (typically several pages never used again) go to the lowest slot.
    fn victim_slot(&self) -> usize {
        let mut victim = 0;
        for (slot, &next) in self.slot_next_use.iter().enumerate().skip(1) {
            if next > self.slot_next_use[victim] {
                victim = slot;
            }
        }
        victim
    }
}

impl EvictionPolicy for OptimalPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Optimal
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.slot_of.contains_key(&page)
    }

    /// # Panics
    /// Panics if `page` is not the next element of the sequence this policy
    /// was built from.
    fn step(&mut self, page: PageId) -> StepOutcome {
        assert!(
            self.cursor < self.pages.len(),
            "optimal policy stepped past the end of its reference sequence"
        );
        assert_eq!(
            self.pages[self.cursor], page,
            "optimal policy stepped out of order at position {}",
            self.cursor
        );

        let next = self.next_use[self.cursor];
        self.cursor += 1;

        if let Some(&slot) = self.slot_of.get(&page) {
            self.slot_next_use[slot] = next;
            return StepOutcome::Hit;
        }

        if self.slots.len() < self.capacity {
            self.slot_of.insert(page, self.slots.len());
            self.slots.push(page);
            self.slot_next_use.push(next);
            return StepOutcome::Fault { evicted: None };
        }

        let slot = self.victim_slot();
        let victim = std::mem::replace(&mut self.slots[slot], page);
        self.slot_next_use[slot] = next;
        self.slot_of.remove(&victim);
        self.slot_of.insert(page, slot);
        trace!(evicted = %victim, incoming = %page, slot, "optimal eviction");

        StepOutcome::Fault {
            evicted: Some(victim),
        }
    }

    fn frames(&self) -> Vec<Option<PageId>> {
        padded(self.slots.iter().copied(), self.capacity)
    }
}
