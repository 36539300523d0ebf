//! Common types and utilities shared across pagesim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (PageId, FrameId)
//! - Validated inputs (FrameCapacity, ReferenceSequence)

mod capacity;
pub mod config;
pub mod error;
mod frame_id;
mod page_id;
mod sequence;

pub use capacity::FrameCapacity;
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
pub use sequence::ReferenceSequence;
