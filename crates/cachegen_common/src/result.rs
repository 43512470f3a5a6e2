//! Internal error type for invariant violations inside the generator.

/// Result type for operations that can only fail because of a generator bug.
pub type InternalResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in cachegen, not a user input problem.
///
/// User-facing failures (unsupported types, identifier collisions, ...) have
/// their own typed errors. This one is reserved for broken invariants, such as
/// a local-scope block asked to hold declarations for more than one type.
#[derive(Debug, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
