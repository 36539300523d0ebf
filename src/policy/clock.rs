//! CLOCK (Second Chance) replacement policy.
//!
//! Frames form a ring of slots, each with a use bit. A hit sets the bit. A
//! fault sweeps the hand forward, clearing set bits, until it reaches a slot
//! whose bit is clear (an empty slot counts as clear), replaces that slot and
//! parks the hand just past it.

use std::collections::HashMap;

use tracing::trace;

use super::{EvictionPolicy, PolicyKind, StepOutcome};
use crate::common::{FrameCapacity, FrameId, PageId};

/// One slot of the clock ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClockSlot {
    page: Option<PageId>,
    referenced: bool,
}

/// A CLOCK eviction policy.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    /// Fixed ring of `capacity` slots.
    slots: Vec<ClockSlot>,

    /// Slot holding each resident page.
    slot_of: HashMap<PageId, FrameId>,

    /// Next slot the sweep will examine.
    hand: FrameId,
}

impl ClockPolicy {
    /// Create an empty CLOCK policy with the hand at slot 0.
    pub fn new(capacity: FrameCapacity) -> Self {
        Self {
            slots: vec![ClockSlot::default(); capacity.get()],
            slot_of: HashMap::with_capacity(capacity.get()),
            hand: FrameId::default(),
        }
    }

    /// Current position of the clock hand.
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    /// Use bit of a resident page, or `None` if the page is not resident.
    pub fn is_referenced(&self, page: PageId) -> Option<bool> {
        self.slot_of
            .get(&page)
            .map(|frame_id| self.slots[frame_id.0].referenced)
    }

    /// Sweep from the hand to the first slot with a clear use bit.
    ///
    /// Terminates within one revolution: every set bit passed is cleared.
    fn sweep(&mut self) -> FrameId {
        let capacity = self.slots.len();
        while self.slots[self.hand.0].referenced {
            self.slots[self.hand.0].referenced = false;
            self.hand = self.hand.next(capacity);
        }
        self.hand
    }
}

impl EvictionPolicy for ClockPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn len(&self) -> usize {
        self.slot_of.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.slot_of.contains_key(&page)
    }

    fn step(&mut self, page: PageId) -> StepOutcome {
        if let Some(&frame_id) = self.slot_of.get(&page) {
            self.slots[frame_id.0].referenced = true;
            return StepOutcome::Hit;
        }

        let frame_id = self.sweep();
        let slot = &mut self.slots[frame_id.0];
        let evicted = slot.page.replace(page);
        slot.referenced = true;

        if let Some(victim) = evicted {
            self.slot_of.remove(&victim);
            trace!(evicted = %victim, incoming = %page, %frame_id, "clock eviction");
        }
        self.slot_of.insert(page, frame_id);
        self.hand = frame_id.next(self.slots.len());

        StepOutcome::Fault { evicted }
    }

    fn frames(&self) -> Vec<Option<PageId>> {
        self.slots.iter().map(|slot| slot.page).collect()
    }
}
