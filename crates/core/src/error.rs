//! Domain error model.

use thiserror::Error;

/// Result type used across the bridge's domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic domain-level failure.
///
/// Keep this focused on input problems the caller can fix. Infrastructure
/// concerns (engine transport, credential store) carry their own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wire field failed normalization: a non-digit string, an empty
    /// string, or a value exceeding the target width.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
