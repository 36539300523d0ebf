//! Simulator - drives a policy over a reference sequence.
//!
//! The [`Simulator`] provides:
//! - Capacity validation before any stepping
//! - One [`TraceStep`] per reference, with a fixed-width frame snapshot
//! - Side-by-side comparison of all policies
//! - Capacity sweeps for one policy

use std::thread;

use parking_lot::Mutex;
use tracing::debug;

use crate::common::{FrameCapacity, PageId, ReferenceSequence, Result};
use crate::policy::{EvictionPolicy, PolicyKind};
use crate::sim::{Comparison, PolicyRun, Statistics, Trace, TraceStep};

/// Runs eviction policies over reference sequences with a fixed capacity.
///
/// A simulator holds no state besides its capacity: every run builds a fresh
/// policy, so repeated runs with the same input produce identical output and
/// runs may execute concurrently.
///
/// # Usage
/// ```
/// use pagesim::{PolicyKind, ReferenceSequence, Simulator};
///
/// let seq = ReferenceSequence::from(vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2]);
/// let sim = Simulator::new(3).unwrap();
///
/// let (trace, stats) = sim.run(&seq, PolicyKind::Optimal);
/// assert_eq!(trace.len(), seq.len());
/// assert_eq!(stats.faults(), 7);
///
/// let comparison = sim.compare(&seq);
/// assert_eq!(comparison.best().map(|run| run.kind), Some(PolicyKind::Optimal));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    capacity: FrameCapacity,
}

impl Simulator {
    /// Create a simulator with `frames` frames.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `frames` is 0
    pub fn new(frames: usize) -> Result<Self> {
        Ok(Self::with_capacity(FrameCapacity::new(frames)?))
    }

    /// Create a simulator from an already validated capacity.
    pub fn with_capacity(capacity: FrameCapacity) -> Self {
        Self { capacity }
    }

    /// Frame capacity used by every run.
    pub fn capacity(&self) -> FrameCapacity {
        self.capacity
    }

    /// Run one policy over the whole sequence.
    ///
    /// An empty sequence yields an empty trace and zero statistics.
    pub fn run(&self, sequence: &ReferenceSequence, kind: PolicyKind) -> (Trace, Statistics) {
        let mut policy = kind.build(self.capacity, sequence);
        self.drive(policy.as_mut(), sequence)
    }

    /// Run all policies over the same sequence.
    ///
    /// Each policy runs on its own scoped thread with its own state; the
    /// result lists runs in [`PolicyKind::ALL`] order regardless of which
    /// thread finished first.
    pub fn compare(&self, sequence: &ReferenceSequence) -> Comparison {
        let runs: Mutex<Vec<PolicyRun>> = Mutex::new(Vec::with_capacity(PolicyKind::ALL.len()));

        thread::scope(|s| {
            for kind in PolicyKind::ALL {
                let runs = &runs;
                s.spawn(move || {
                    let (trace, stats) = self.run(sequence, kind);
                    runs.lock().push(PolicyRun { kind, trace, stats });
                });
            }
        });

        let mut runs = runs.into_inner();
        runs.sort_by_key(|run| run.kind);

        let comparison = Comparison::new(self.capacity, runs);
        debug!(
            capacity = self.capacity.get(),
            best = ?comparison.best().map(|run| run.kind),
            "comparison finished"
        );
        comparison
    }

    /// Run one policy at several capacities.
    ///
    /// Returns statistics per capacity, in the order given. This is the
    /// experiment that exposes Belady's anomaly under FIFO.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if any capacity is 0; nothing is run
    pub fn sweep<I>(
        sequence: &ReferenceSequence,
        kind: PolicyKind,
        capacities: I,
    ) -> Result<Vec<(FrameCapacity, Statistics)>>
    where
        I: IntoIterator<Item = usize>,
    {
        let capacities = capacities
            .into_iter()
            .map(FrameCapacity::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(capacities
            .into_iter()
            .map(|capacity| {
                let (_, stats) = Simulator::with_capacity(capacity).run(sequence, kind);
                (capacity, stats)
            })
            .collect())
    }

    fn drive(&self, policy: &mut dyn EvictionPolicy, sequence: &[PageId]) -> (Trace, Statistics) {
        debug!(
            policy = %policy.kind(),
            capacity = self.capacity.get(),
            references = sequence.len(),
            "simulation started"
        );

        let mut trace = Trace::with_capacity(policy.kind(), self.capacity, sequence.len());
        let mut stats = Statistics::default();

        for (index, &page) in sequence.iter().enumerate() {
            let outcome = policy.step(page);
            stats.record(outcome);
            trace.push(TraceStep {
                ordinal: index + 1,
                page,
                frames: policy.frames(),
                faults: stats.faults(),
                hits: stats.hits(),
                outcome,
            });
        }

        debug!(
            policy = %policy.kind(),
            faults = stats.faults(),
            hits = stats.hits(),
            "simulation finished"
        );
        (trace, stats)
    }
}

/// Run `kind` over `sequence` with `frames` frames.
///
/// Shorthand for [`Simulator::new`] followed by [`Simulator::run`].
///
/// # Errors
/// - `Error::InvalidCapacity` if `frames` is 0; no policy is stepped
pub fn run(
    sequence: &ReferenceSequence,
    frames: usize,
    kind: PolicyKind,
) -> Result<(Trace, Statistics)> {
    Ok(Simulator::new(frames)?.run(sequence, kind))
}
