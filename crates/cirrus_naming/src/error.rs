//! Error types for naming and tagging.

use thiserror::Error;

/// Result type alias for naming and tagging operations.
pub type NamingResult<T> = Result<T, ValidationError>;

/// Structural violations in a composed name or tag set.
///
/// These are never retried: the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("Base name must not be empty")]
    EmptyBaseName,

    #[error("Name '{name}' does not fit within {max} characters for kind '{kind}'")]
    NameTooLong {
        name: String,
        kind: String,
        max: usize,
    },

    #[error("Name '{name}' contains characters not allowed for kind '{kind}'")]
    InvalidCharacter { name: String, kind: String },

    #[error("Required tag '{0}' is missing")]
    MissingTag(String),

    #[error("Required tag '{0}' must not be empty")]
    EmptyTag(String),
}
