use thiserror::Error;

/// Error type for all coordinate construction and computation.
///
/// The two variants deliberately separate "the caller handed us garbage" from
/// "our own math broke": an [`InvalidArgument`](CoordinateError::InvalidArgument)
/// is always detected eagerly at the API boundary, while an
/// [`InvalidState`](CoordinateError::InvalidState) means an already-constructed
/// value, or a value produced mid-computation, violates its invariants.
/// Neither is ever silently coerced into a NaN or infinite result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// An out-of-range or non-finite numeric input, or a violated semantic
    /// precondition (eg, asking for the central angle between coordinates on
    /// different spheres).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate value violates its representation invariants, or a
    /// conversion produced one that does.
    #[error("invalid coordinate state: {0}")]
    InvalidState(String),
}

/// Result type for kugel operations.
pub type Result<T> = std::result::Result<T, CoordinateError>;
