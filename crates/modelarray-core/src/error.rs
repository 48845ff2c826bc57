//! Error types for ModelArray core.

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, SignalError>;
