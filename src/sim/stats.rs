//! Aggregate simulation statistics.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::common::Error;
use crate::policy::StepOutcome;

/// Fault and hit totals of one simulation run.
///
/// Derived from the trace: always equal to the cumulative counters of the
/// last step, or all zero for an empty sequence. Only the simulator
/// accumulates into it; callers read it through accessors.
///
/// Serializes as `{hits, faults, evictions, hit_rate}`. The hit rate is
/// computed on the way out and ignored on the way in.
///
/// # Example
/// ```
/// use pagesim::{PolicyKind, ReferenceSequence, Simulator};
///
/// let seq = ReferenceSequence::from(vec![1, 2, 1, 3]);
/// let (_, stats) = Simulator::new(2).unwrap().run(&seq, PolicyKind::Lru);
/// assert_eq!(stats.faults(), 3);
/// assert_eq!(stats.hits(), 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawStatistics")]
pub struct Statistics {
    hits: u64,
    faults: u64,
    evictions: u64,
}

impl Statistics {
    /// References that found their page resident.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// References that had to admit their page.
    #[inline]
    pub fn faults(&self) -> u64 {
        self.faults
    }

    /// Faults that displaced a resident page.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Calculate hit rate (0.0 to 1.0).
    ///
    /// Defined as 0.0 when no reference has been processed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.faults;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate fault rate (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        let total = self.hits + self.faults;
        if total == 0 {
            0.0
        } else {
            self.faults as f64 / total as f64
        }
    }

    /// Total references processed.
    #[inline]
    pub fn references(&self) -> u64 {
        self.hits + self.faults
    }

    /// Account for one step.
    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Hit => self.hits += 1,
            StepOutcome::Fault { evicted } => {
                self.faults += 1;
                if evicted.is_some() {
                    self.evictions += 1;
                }
            }
        }
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Statistics", 4)?;
        state.serialize_field("hits", &self.hits)?;
        state.serialize_field("faults", &self.faults)?;
        state.serialize_field("evictions", &self.evictions)?;
        state.serialize_field("hit_rate", &self.hit_rate())?;
        state.end()
    }
}

/// Wire form of [`Statistics`] before validation.
#[derive(Deserialize)]
struct RawStatistics {
    hits: u64,
    faults: u64,
    evictions: u64,
}

impl TryFrom<RawStatistics> for Statistics {
    type Error = Error;

    fn try_from(raw: RawStatistics) -> Result<Self, Error> {
        if raw.evictions > raw.faults {
            return Err(Error::InvalidData(format!(
                "{} evictions exceed {} faults",
                raw.evictions, raw.faults
            )));
        }
        Ok(Statistics {
            hits: raw.hits,
            faults: raw.faults,
            evictions: raw.evictions,
        })
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, faults: {}, evictions: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.faults,
            self.evictions,
            self.hit_rate() * 100.0
        )
    }
}
