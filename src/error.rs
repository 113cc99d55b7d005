//! Crate-wide error type.
//!
//! Every fallible operation reports one of these kinds to its immediate
//! caller. There is no global error state.

use thiserror::Error;

/// Failure kinds reported by containers, heaps and cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The heap refused (or could not satisfy) an allocation. The receiver
    /// is left in its prior state.
    #[error("allocation of {size} bytes failed")]
    AllocationFailure {
        /// Number of bytes requested
        size: usize,
    },

    /// A required argument or hook was missing or out of its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A position past the end of a bounded sequence.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The rejected position
        index: usize,
        /// Number of valid positions
        len: usize,
    },

    /// The cursor cannot move in the requested direction.
    #[error("iterator exhausted")]
    IteratorExhausted,

    /// Lookup by key found no entry.
    #[error("key not found")]
    KeyNotFound,

    /// The operation is not offered by this cursor or container.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}

impl Error {
    /// Allocation failure for `size` bytes.
    pub fn allocation(size: usize) -> Self {
        Self::AllocationFailure { size }
    }

    /// Out-of-range access at `index` against `len` positions.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            Error::allocation(64).to_string(),
            "allocation of 64 bytes failed"
        );
        assert_eq!(
            Error::out_of_range(7, 3).to_string(),
            "index 7 out of range for length 3"
        );
        assert_eq!(
            Error::InvalidArgument("step must be non-zero").to_string(),
            "invalid argument: step must be non-zero"
        );
    }

    #[test]
    fn kinds_stay_distinct() {
        assert_ne!(Error::IteratorExhausted, Error::KeyNotFound);
        assert_ne!(Error::Unsupported("prev"), Error::InvalidArgument("prev"));
    }
}
