//! Library error type.
//!
//! Only genuinely fatal conditions surface as errors; recoverable problems
//! (unknown measure name, malformed range, unknown output format) are logged
//! and replaced by a documented fallback instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Split specifications are validated strictly because a silently wrong
    /// block assignment would corrupt a distributed run.
    #[error("invalid split specification '{0}'")]
    InvalidSplit(String),

    /// The matrix must be allocated before it can be filled.
    #[error("matrix has not been allocated")]
    Unallocated,

    /// The string collection handed to the driver does not match the
    /// collection the matrix was initialized from.
    #[error("string collection has {got} values, matrix expects {expected}")]
    CollectionMismatch { expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
