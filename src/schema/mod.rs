//! The directory schema: record types, field names, and the XML vocabulary.
//!
//! # Key Types
//!
//! - [`RecordType`] - The kinds of principal a record can describe
//! - [`FieldName`] - The fields a record can carry
//!
//! The [`xml`] submodule owns the mapping between these types and the tokens
//! that appear in directory documents.
//!
//! # Examples
//!
//! ```rust
//! use dirstore::schema::{FieldName, xml};
//!
//! assert_eq!(xml::field_for_element("short-name"), Some(FieldName::ShortNames));
//! assert!(FieldName::ShortNames.is_multi_valued());
//! ```

pub mod types;
pub mod xml;

// Re-export the main types for convenience
pub use types::{FieldName, RecordType};
