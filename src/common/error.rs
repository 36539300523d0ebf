//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// The simulator performs no I/O, so every error is a deterministic
/// function of the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Frame capacity must hold at least one page.
    #[error("Invalid frame capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Deserialized simulation output does not describe a real run.
    #[error("Invalid simulation data: {0}")]
    InvalidData(String),
}
