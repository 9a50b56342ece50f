//! In-memory directory service backed by a single XML document.
//!
//! dirstore loads principal records (users and groups) from an XML source,
//! normalizes their fields, and serves exact-value lookups through a field
//! index rebuilt on every load. Loading is lazy: the source is read and
//! parsed the first time any derived property is accessed, and cached until
//! an explicit reload.
//!
//! # Core Components
//!
//! - [`XmlDirectoryService`] - The record store; owns a source and the
//!   loaded snapshot
//! - [`DirectoryService`] - The query trait consumers program against
//! - [`DirectorySource`] - Byte access seam, with [`FileSource`] and
//!   [`InMemorySource`] implementations
//! - [`DirectoryRecord`] - One principal as an immutable value object
//! - [`FieldIndex`] - Value-to-records reverse mapping for O(1) lookups
//!
//! # Quick Start
//!
//! ```rust
//! use dirstore::{DirectoryService, InMemorySource, XmlDirectoryService};
//!
//! # fn main() -> dirstore::DirectoryResult<()> {
//! let source = InMemorySource::new(
//!     r#"<directory realm="Example Realm">
//!          <record type="user">
//!            <uid>u1</uid>
//!            <short-name>alice</short-name>
//!            <short-name>al</short-name>
//!            <email>alice@example.com</email>
//!          </record>
//!          <record type="group">
//!            <uid>staff</uid>
//!            <full-name>All Staff</full-name>
//!          </record>
//!        </directory>"#,
//! );
//! let service = XmlDirectoryService::new(source);
//!
//! assert_eq!(service.realm_name()?, "Example Realm");
//! let alice = service.record_with_uid("u1")?.unwrap();
//! assert_eq!(alice.short_names(), ["alice", "al"]);
//! assert_eq!(service.records_with_short_name("al")?.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Unrecognized record types and field names in the source are not errors;
//! they are collected into dedicated sets for diagnostics. One documented
//! quirk: the first unknown record type stops record processing for the
//! rest of the document (see [`parser`]).

pub mod error;
pub mod index;
pub mod parser;
pub mod record;
pub mod schema;
pub mod service;
pub mod source;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{DirectoryError, DirectoryResult, StructuralError, StructuralResult};
pub use index::{FieldIndex, FieldIndexStats, INDEXED_FIELDS};
pub use parser::{ParsedDirectory, parse_directory};
pub use record::{DirectoryRecord, FieldValue, RecordFields};
pub use schema::{FieldName, RecordType};
pub use service::DirectoryService;
pub use source::{DirectorySource, FileSource, InMemorySource};
pub use store::{DirectorySnapshot, SourceVersion, XmlDirectoryService};
