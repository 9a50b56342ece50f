//! Error types for directory store operations.
//!
//! Errors come in two layers: [`StructuralError`] covers problems with the
//! directory document itself, while [`DirectoryError`] covers everything that
//! can go wrong while loading or querying the service, structural problems
//! included.

use crate::schema::FieldName;

/// Errors raised while interpreting a directory document.
///
/// A structural error means the document could not be interpreted as a
/// directory at all. No partial record data survives one of these; the
/// caller's previously loaded state, if any, is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum StructuralError {
    /// The document is not well-formed XML
    #[error("Malformed directory document: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// The document is not valid UTF-8
    #[error("Directory document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// The root element is not the expected directory element
    #[error("Incorrect root element: '{tag}'")]
    IncorrectRootElement { tag: String },

    /// The root element carries no realm name
    #[error("No realm name in directory document")]
    MissingRealmName,
}

/// Main error type for directory service operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The backing document could not be interpreted as a directory
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    /// The directory source could not be read
    #[error("Failed to read directory source: {0}")]
    Io(#[from] std::io::Error),

    /// The realm name comes from the document and cannot be assigned
    #[error("Realm name is immutable; it is read from the directory document")]
    RealmNameImmutable,

    /// A unique lookup matched more than one record
    #[error("Ambiguous lookup: multiple records match {field} '{value}'")]
    AmbiguousLookup { field: FieldName, value: String },

    /// A lock guarding the loaded state was poisoned by a panicking thread
    #[error("Directory state lock poisoned")]
    LockPoisoned,
}

// Convenience methods for creating common errors
impl StructuralError {
    /// Create an incorrect root element error
    pub fn incorrect_root_element(tag: impl Into<String>) -> Self {
        Self::IncorrectRootElement { tag: tag.into() }
    }
}

impl DirectoryError {
    /// Create an ambiguous lookup error
    pub fn ambiguous_lookup(field: FieldName, value: impl Into<String>) -> Self {
        Self::AmbiguousLookup {
            field,
            value: value.into(),
        }
    }
}

// Result type aliases for convenience
pub type DirectoryResult<T> = Result<T, DirectoryError>;
pub type StructuralResult<T> = Result<T, StructuralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = StructuralError::incorrect_root_element("roster");
        assert!(error.to_string().contains("roster"));
    }

    #[test]
    fn test_ambiguous_lookup_display() {
        let error = DirectoryError::ambiguous_lookup(FieldName::Uid, "u1");
        assert!(error.to_string().contains("uid"));
        assert!(error.to_string().contains("u1"));
    }

    #[test]
    fn test_error_chain() {
        let structural = StructuralError::MissingRealmName;
        let directory = DirectoryError::from(structural);
        assert!(directory.to_string().contains("Structural error"));
    }
}
