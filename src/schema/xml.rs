//! The XML vocabulary for directory documents.
//!
//! A directory document is a single `directory` element carrying a `realm`
//! attribute, containing one `record` element per principal:
//!
//! ```xml
//! <directory realm="Example Realm">
//!   <record type="user">
//!     <uid>u1</uid>
//!     <short-name>alice</short-name>
//!     <email>alice@example.com</email>
//!   </record>
//! </directory>
//! ```
//!
//! This module owns the mapping between document tokens and the typed
//! vocabulary in [`types`](crate::schema::types). Each mapping function has a
//! paired inverse, and both directions are exhaustive over the enum side, so
//! extending [`FieldName`] or [`RecordType`] forces the tables to be revisited.

use crate::schema::{FieldName, RecordType};

/// Root element of a directory document.
pub const DIRECTORY_ELEMENT: &str = "directory";

/// Element holding one principal record.
pub const RECORD_ELEMENT: &str = "record";

/// Attribute on the root element naming the realm.
pub const REALM_ATTRIBUTE: &str = "realm";

/// Attribute on a record element naming its record type.
pub const RECORD_TYPE_ATTRIBUTE: &str = "type";

/// Record type assumed when a record element carries no `type` attribute.
pub const DEFAULT_RECORD_TYPE: RecordType = RecordType::User;

/// Field described by a child element of a record, looked up by element tag.
///
/// Returns `None` for tags outside the vocabulary; the parser reports those
/// as unknown field names rather than failing the document.
pub fn field_for_element(tag: &str) -> Option<FieldName> {
    match tag {
        "uid" => Some(FieldName::Uid),
        "guid" => Some(FieldName::Guid),
        "short-name" => Some(FieldName::ShortNames),
        "full-name" => Some(FieldName::FullNames),
        "email" => Some(FieldName::EmailAddresses),
        "password" => Some(FieldName::Password),
        _ => None,
    }
}

/// Element tag describing a field; inverse of [`field_for_element`].
///
/// [`FieldName::RecordType`] has no element of its own. It is carried by the
/// record element's `type` attribute.
pub fn element_for_field(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::Uid => Some("uid"),
        FieldName::Guid => Some("guid"),
        FieldName::RecordType => None,
        FieldName::ShortNames => Some("short-name"),
        FieldName::FullNames => Some("full-name"),
        FieldName::EmailAddresses => Some("email"),
        FieldName::Password => Some("password"),
    }
}

/// Record type named by a `type` attribute value.
///
/// Returns `None` for values outside the vocabulary; the parser reports those
/// as unknown record types.
pub fn record_type_for_value(value: &str) -> Option<RecordType> {
    match value {
        "user" => Some(RecordType::User),
        "group" => Some(RecordType::Group),
        _ => None,
    }
}

/// Attribute value naming a record type; inverse of [`record_type_for_value`].
///
/// The attribute value is the record type's canonical name.
pub fn value_for_record_type(record_type: RecordType) -> &'static str {
    record_type.name()
}
