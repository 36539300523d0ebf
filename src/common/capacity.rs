//! Validated frame capacity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// Number of frames available to a policy.
///
/// Always at least 1: construction is the single validation point, so every
/// policy can rely on a non-empty slot array.
///
/// # Example
/// ```
/// use pagesim::{Error, FrameCapacity};
///
/// assert_eq!(FrameCapacity::new(3).unwrap().get(), 3);
/// assert_eq!(FrameCapacity::new(0), Err(Error::InvalidCapacity(0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct FrameCapacity(usize);

impl FrameCapacity {
    /// Validate a raw frame count.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `frames` is 0
    pub fn new(frames: usize) -> Result<Self> {
        if frames == 0 {
            return Err(Error::InvalidCapacity(frames));
        }
        Ok(FrameCapacity(frames))
    }

    /// The frame count.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for FrameCapacity {
    type Error = Error;

    fn try_from(frames: usize) -> Result<Self> {
        FrameCapacity::new(frames)
    }
}

impl From<FrameCapacity> for usize {
    fn from(capacity: FrameCapacity) -> usize {
        capacity.0
    }
}

impl fmt::Display for FrameCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frames", self.0)
    }
}
