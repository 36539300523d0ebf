//! Side-by-side results of every policy over one sequence.

use serde::{Deserialize, Serialize};

use crate::common::{Error, FrameCapacity};
use crate::policy::PolicyKind;
use crate::sim::{Statistics, Trace};

/// Output of one policy run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRun {
    pub kind: PolicyKind,
    pub trace: Trace,
    pub stats: Statistics,
}

/// Results of running every policy over the same sequence and capacity.
///
/// Runs are kept in [`PolicyKind::ALL`] order. A deserialized comparison
/// holds at least one run, no kind twice, and every run's trace agrees with
/// its kind, the shared capacity and its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawComparison")]
pub struct Comparison {
    capacity: FrameCapacity,
    runs: Vec<PolicyRun>,
}

/// Wire form of [`Comparison`] before validation.
#[derive(Deserialize)]
struct RawComparison {
    capacity: FrameCapacity,
    runs: Vec<PolicyRun>,
}

impl TryFrom<RawComparison> for Comparison {
    type Error = Error;

    fn try_from(raw: RawComparison) -> Result<Self, Error> {
        if raw.runs.is_empty() {
            return Err(Error::InvalidData("comparison has no runs".to_string()));
        }
        if raw.runs.windows(2).any(|pair| pair[0].kind >= pair[1].kind) {
            return Err(Error::InvalidData(
                "comparison runs are not in policy order".to_string(),
            ));
        }
        for run in &raw.runs {
            if run.trace.policy() != run.kind {
                return Err(Error::InvalidData(format!(
                    "{} run carries a {} trace",
                    run.kind,
                    run.trace.policy()
                )));
            }
            if run.trace.capacity() != raw.capacity {
                return Err(Error::InvalidData(format!(
                    "{} run used {}, comparison has {}",
                    run.kind,
                    run.trace.capacity(),
                    raw.capacity
                )));
            }
            if run.stats != run.trace.statistics() {
                return Err(Error::InvalidData(format!(
                    "{} statistics disagree with its trace",
                    run.kind
                )));
            }
        }

        Ok(Comparison {
            capacity: raw.capacity,
            runs: raw.runs,
        })
    }
}

impl Comparison {
    pub(crate) fn new(capacity: FrameCapacity, runs: Vec<PolicyRun>) -> Self {
        debug_assert!(!runs.is_empty());
        Self { capacity, runs }
    }

    /// Frame capacity shared by all runs.
    pub fn capacity(&self) -> FrameCapacity {
        self.capacity
    }

    /// All runs, in [`PolicyKind::ALL`] order.
    pub fn runs(&self) -> &[PolicyRun] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PolicyRun> {
        self.runs.iter()
    }

    /// Result for one policy.
    pub fn get(&self, kind: PolicyKind) -> Option<&PolicyRun> {
        self.runs.iter().find(|run| run.kind == kind)
    }

    /// Statistics for one policy.
    pub fn stats(&self, kind: PolicyKind) -> Option<Statistics> {
        self.get(kind).map(|run| run.stats)
    }

    /// The run with the fewest faults.
    ///
    /// Ties go to the policy listed first in [`PolicyKind::ALL`]. `None`
    /// only if there are no runs, which neither the simulator nor
    /// deserialization produces.
    pub fn best(&self) -> Option<&PolicyRun> {
        let mut runs = self.runs.iter();
        let mut best = runs.next()?;
        for run in runs {
            if run.stats.faults() < best.stats.faults() {
                best = run;
            }
        }
        Some(best)
    }

    /// Fault counts per policy, the data behind a fault bar chart.
    pub fn faults(&self) -> Vec<(PolicyKind, u64)> {
        self.runs
            .iter()
            .map(|run| (run.kind, run.stats.faults()))
            .collect()
    }

    /// Hit rates per policy, the data behind a hit-rate bar chart.
    pub fn hit_rates(&self) -> Vec<(PolicyKind, f64)> {
        self.runs
            .iter()
            .map(|run| (run.kind, run.stats.hit_rate()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Comparison {
    type Item = &'a PolicyRun;
    type IntoIter = std::slice::Iter<'a, PolicyRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
