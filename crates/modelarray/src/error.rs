//! Error types for collections.

use modelarray_core::SignalError;

/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Errors returned by the strict collection entry points.
///
/// The permissive operations (`get`, `remove`, `pop`, `splice`, ...) never
/// fail; they ignore what they cannot resolve.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// A position lies past the end of the collection.
    #[error("Index {index} is out of bounds for a collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An event name that is not one of `add`, `remove`, `reset`, `sort`.
    #[error("Unknown collection event '{0}'")]
    UnknownEvent(String),

    /// Signal-related error.
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}

impl CollectionError {
    /// Create an out-of-bounds error.
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}
