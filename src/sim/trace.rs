//! Step-by-step simulation trace.

use std::fmt;

use crc32fast::Hasher;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::common::config::EMPTY_SLOT_MARKER;
use crate::common::{Error, FrameCapacity, PageId};
use crate::policy::{PolicyKind, StepOutcome};
use crate::sim::Statistics;

/// State of the simulation right after one reference.
///
/// Serializes its fields plus the running `hit_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct TraceStep {
    /// 1-based position in the reference sequence.
    pub ordinal: usize,

    /// The page referenced at this step.
    pub page: PageId,

    /// Resident set after the step, exactly `capacity` slots long.
    ///
    /// `None` marks an empty slot.
    pub frames: Vec<Option<PageId>>,

    /// Faults so far, including this step.
    pub faults: u64,

    /// Hits so far, including this step.
    pub hits: u64,

    pub outcome: StepOutcome,
}

impl TraceStep {
    /// Running hit rate up to and including this step.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.faults;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Number of occupied slots in the snapshot.
    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }

    fn hash_into(&self, hasher: &mut Hasher) {
        hasher.update(&(self.ordinal as u64).to_le_bytes());
        hasher.update(&self.page.0.to_le_bytes());
        for slot in &self.frames {
            hash_slot(hasher, *slot);
        }
        hasher.update(&self.faults.to_le_bytes());
        hasher.update(&self.hits.to_le_bytes());
        match self.outcome {
            StepOutcome::Hit => hasher.update(&[0]),
            StepOutcome::Fault { evicted } => {
                hasher.update(&[1]);
                hash_slot(hasher, evicted);
            }
        }
    }
}

impl Serialize for TraceStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TraceStep", 7)?;
        state.serialize_field("ordinal", &self.ordinal)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("frames", &self.frames)?;
        state.serialize_field("faults", &self.faults)?;
        state.serialize_field("hits", &self.hits)?;
        state.serialize_field("outcome", &self.outcome)?;
        state.serialize_field("hit_rate", &self.hit_rate())?;
        state.end()
    }
}

fn hash_slot(hasher: &mut Hasher, slot: Option<PageId>) {
    match slot {
        Some(page) => {
            hasher.update(&[1]);
            hasher.update(&page.0.to_le_bytes());
        }
        None => hasher.update(&[0]),
    }
}

/// Renders one table row: `Step 4 | 2 | 2 0 1 | faults: 4 | hits: 0 | 0.00% | Fault`.
impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} | {} |", self.ordinal, self.page)?;
        for slot in &self.frames {
            match slot {
                Some(page) => write!(f, " {}", page)?,
                None => write!(f, " {}", EMPTY_SLOT_MARKER)?,
            }
        }
        write!(
            f,
            " | faults: {} | hits: {} | {:.2}% | {}",
            self.faults,
            self.hits,
            self.hit_rate() * 100.0,
            self.outcome
        )
    }
}

/// The ordered record of one policy run, one step per reference.
///
/// Built append-only by the simulator and handed to the caller on
/// completion; there is no way to modify a trace after that. Deserializing
/// checks the same shape the simulator guarantees: ordinals counting from 1,
/// snapshots exactly `capacity` wide holding the referenced page, and
/// cumulative counters that agree with the outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct Trace {
    policy: PolicyKind,
    capacity: FrameCapacity,
    steps: Vec<TraceStep>,
}

/// Wire form of [`Trace`] before validation.
#[derive(Deserialize)]
struct RawTrace {
    policy: PolicyKind,
    capacity: FrameCapacity,
    steps: Vec<TraceStep>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = Error;

    fn try_from(raw: RawTrace) -> Result<Self, Error> {
        let mut stats = Statistics::default();
        for (index, step) in raw.steps.iter().enumerate() {
            let ordinal = index + 1;
            if step.ordinal != ordinal {
                return Err(Error::InvalidData(format!(
                    "step {} has ordinal {}",
                    ordinal, step.ordinal
                )));
            }
            if step.frames.len() != raw.capacity.get() {
                return Err(Error::InvalidData(format!(
                    "step {} has {} slots for {}",
                    ordinal,
                    step.frames.len(),
                    raw.capacity
                )));
            }
            if !step.frames.contains(&Some(step.page)) {
                return Err(Error::InvalidData(format!(
                    "step {} references page {} which is not resident",
                    ordinal, step.page
                )));
            }

            stats.record(step.outcome);
            if step.faults != stats.faults() || step.hits != stats.hits() {
                return Err(Error::InvalidData(format!(
                    "step {} counters disagree with outcomes",
                    ordinal
                )));
            }
        }

        Ok(Trace {
            policy: raw.policy,
            capacity: raw.capacity,
            steps: raw.steps,
        })
    }
}

impl Trace {
    pub(crate) fn with_capacity(policy: PolicyKind, capacity: FrameCapacity, len: usize) -> Self {
        Self {
            policy,
            capacity,
            steps: Vec::with_capacity(len),
        }
    }

    pub(crate) fn push(&mut self, step: TraceStep) {
        debug_assert_eq!(step.ordinal, self.steps.len() + 1);
        debug_assert_eq!(step.frames.len(), self.capacity.get());
        self.steps.push(step);
    }

    /// Policy that produced this trace.
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// Frame capacity of the run.
    pub fn capacity(&self) -> FrameCapacity {
        self.capacity
    }

    /// All steps, in reference order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    /// Final step, if the sequence was non-empty.
    pub fn last(&self) -> Option<&TraceStep> {
        self.steps.last()
    }

    /// Totals of the run, read off the last step.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::default();
        for step in &self.steps {
            stats.record(step.outcome);
        }
        stats
    }

    /// CRC32 over the full trace contents.
    ///
    /// Two traces have the same fingerprint when they record the same
    /// policy, capacity and steps, which makes it cheap to check that
    /// repeated runs are byte-identical.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(self.policy.name().as_bytes());
        hasher.update(&(self.capacity.get() as u64).to_le_bytes());
        for step in &self.steps {
            step.hash_into(&mut hasher);
        }
        hasher.finalize()
    }

    /// Consume the trace, keeping only its steps.
    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
