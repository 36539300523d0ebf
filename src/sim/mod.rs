//! Simulation driver and its output model.
//!
//! # Components
//! - [`Simulator`] - Runs a policy over a reference sequence
//! - [`Trace`] / [`TraceStep`] - Per-reference snapshots
//! - [`Statistics`] - Fault/hit totals
//! - [`Comparison`] - All policies over one sequence

mod comparison;
mod simulator;
mod stats;
mod trace;

pub use comparison::{Comparison, PolicyRun};
pub use simulator::{run, Simulator};
pub use stats::Statistics;
pub use trace::{Trace, TraceStep};
