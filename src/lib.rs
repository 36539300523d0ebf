//! pagesim - A deterministic page replacement simulator.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Simulator (sim/)                          │   │
//! │  │   run / compare / sweep  →  Trace + Statistics           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓ step(page)                       │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Eviction Policies (policy/)                    │   │
//! │  │        FIFO  |  LRU  |  Optimal  |  Clock                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Common (common/)                         │   │
//! │  │  PageId, FrameId, FrameCapacity, ReferenceSequence, Error│   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate performs no I/O. Parsing reference strings and rendering
//! tables or charts is left to the caller, which receives plain data.
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameCapacity, Error, config)
//! - [`policy`] - Eviction policy implementations
//! - [`sim`] - Simulator, traces and statistics
//!
//! # Quick Start
//! ```
//! use pagesim::{PolicyKind, ReferenceSequence, Simulator};
//!
//! let seq = ReferenceSequence::from(vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);
//!
//! let (_, three) = Simulator::new(3).unwrap().run(&seq, PolicyKind::Fifo);
//! let (_, four) = Simulator::new(4).unwrap().run(&seq, PolicyKind::Fifo);
//!
//! // Belady's anomaly: more frames, more faults
//! assert!(four.faults() > three.faults());
//! ```

pub mod common;
pub mod policy;
pub mod sim;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, FrameCapacity, FrameId, PageId, ReferenceSequence, Result};

pub use policy::{
    ClockPolicy, EvictionPolicy, FifoPolicy, LruPolicy, OptimalPolicy, PolicyKind, StepOutcome,
};
pub use sim::{run, Comparison, PolicyRun, Simulator, Statistics, Trace, TraceStep};
