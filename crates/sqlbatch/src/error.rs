//! Error types for sqlbatch

use thiserror::Error;

/// Result type alias for sqlbatch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Error types for statement derivation and execution
#[derive(Debug, Error)]
pub enum BatchError {
    /// The compiled SQL does not have the expected shape
    /// (missing `FROM`, unterminated string literal, ...).
    #[error("Format error: {0}")]
    Format(String),

    /// The derived statement would be invalid (e.g. an empty SET clause).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error reported by an [`ExecutionContext`](crate::ExecutionContext) implementation.
    #[error("Execution error: {0}")]
    Execution(String),
}

impl BatchError {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}
