//! Eviction policy implementations.
//!
//! Every policy implements [`EvictionPolicy`]: it is fed one page reference
//! at a time and reports whether the reference hit or faulted.
//!
//! Implemented policies:
//! - [`FifoPolicy`] - First-In-First-Out (admission order)
//! - [`LruPolicy`] - Least Recently Used (recency order)
//! - [`OptimalPolicy`] - Belady's MIN (offline, needs the whole sequence)
//! - [`ClockPolicy`] - Second Chance (circular use-bit scan)

use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::common::{FrameCapacity, PageId};

mod clock;
mod fifo;
mod lru;
mod optimal;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;

/// Result of feeding one reference to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The page was already resident.
    Hit,
    /// The page was not resident and has been admitted.
    ///
    /// `evicted` is the page it displaced, or `None` if a free frame was used.
    Fault { evicted: Option<PageId> },
}

impl StepOutcome {
    /// Whether the reference was a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, StepOutcome::Hit)
    }

    /// Whether the reference was a fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        !self.is_hit()
    }

    /// The page evicted by this step, if any.
    #[inline]
    pub fn evicted(&self) -> Option<PageId> {
        match self {
            StepOutcome::Hit => None,
            StepOutcome::Fault { evicted } => *evicted,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Hit => write!(f, "Hit"),
            StepOutcome::Fault { .. } => write!(f, "Fault"),
        }
    }
}

/// Selects one of the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyKind {
    Fifo,
    Lru,
    Optimal,
    Clock,
}

impl PolicyKind {
    /// All policies, in comparison order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Optimal,
        PolicyKind::Clock,
    ];

    /// Human-readable policy name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Optimal => "Optimal",
            PolicyKind::Clock => "Clock",
        }
    }

    /// Create a fresh, empty policy of this kind.
    ///
    /// `sequence` is the full workload the policy will be stepped over.
    /// Only Optimal reads it; the online policies ignore it.
    pub fn build(self, capacity: FrameCapacity, sequence: &[PageId]) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new(capacity)),
            PolicyKind::Lru => Box::new(LruPolicy::new(capacity)),
            PolicyKind::Optimal => Box::new(OptimalPolicy::new(capacity, sequence)),
            PolicyKind::Clock => Box::new(ClockPolicy::new(capacity)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A page replacement policy driven one reference at a time.
///
/// Each call to [`step`](EvictionPolicy::step) corresponds to exactly one
/// element of the reference sequence, in order. The resident set never
/// exceeds [`capacity`](EvictionPolicy::capacity).
pub trait EvictionPolicy: fmt::Debug + Send {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Maximum number of resident pages.
    fn capacity(&self) -> usize;

    /// Number of currently resident pages.
    fn len(&self) -> usize;

    /// Whether no page is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `page` is currently resident.
    fn contains(&self, page: PageId) -> bool;

    /// Process one reference, admitting and evicting as needed.
    fn step(&mut self, page: PageId) -> StepOutcome;

    /// Snapshot of the resident set, exactly `capacity` slots long.
    ///
    /// Order is policy specific (admission, recency or slot order); free
    /// slots are `None`.
    fn frames(&self) -> Vec<Option<PageId>>;
}

/// Pad an ordered resident list to `capacity` slots with `None`.
pub(crate) fn padded<I>(pages: I, capacity: usize) -> Vec<Option<PageId>>
where
    I: IntoIterator<Item = PageId>,
{
    pages
        .into_iter()
        .map(Some)
        .chain(iter::repeat(None))
        .take(capacity)
        .collect()
}
