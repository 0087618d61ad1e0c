//! Failures raised by stream operations.

use thiserror::Error;

/// Result type for fallible stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Contract violations reported by [`LazyStream`](super::LazyStream).
///
/// These are never recovered internally; every stream operation returns
/// them to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A value was requested from an empty stream.
    #[error("no {operation} in empty stream")]
    EmptySequence {
        /// The operation that needed a non-empty stream.
        operation: &'static str,
    },
    /// An index was past the end of the stream.
    #[error("index {index} out of range for stream of length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of elements forced before the stream ran out.
        length: usize,
    },
}

impl StreamError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        Self::EmptySequence { operation }
    }

    /// Whether this is an [`EmptySequence`](StreamError::EmptySequence) error.
    pub const fn is_empty_sequence(&self) -> bool {
        matches!(self, Self::EmptySequence { .. })
    }
}
