//! Core type vocabulary for directory records.
//!
//! These enums close over everything the store understands: the kinds of
//! principal a record can describe and the fields a record can carry. Tokens
//! in a document that fall outside this vocabulary are never represented
//! here; the parser collects them as unknown tokens instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of principal a directory record describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RecordType {
    /// An individual account
    User,
    /// A named collection of principals
    Group,
}

impl RecordType {
    /// All record types the store understands, in canonical order.
    pub const ALL: [RecordType; 2] = [RecordType::User, RecordType::Group];

    /// Canonical name, as used in exports and log output.
    pub const fn name(&self) -> &'static str {
        match self {
            RecordType::User => "user",
            RecordType::Group => "group",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field a directory record can carry.
///
/// Multi-valued fields accumulate one value per occurrence in a record;
/// single-valued fields keep the last occurrence. [`FieldName::RecordType`]
/// never appears in a record's field map (records expose it through a typed
/// accessor instead) but participates in indexing and lookups like any other
/// field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Stable unique identifier
    Uid,
    /// Globally unique identifier
    Guid,
    /// The kind of principal the record describes
    RecordType,
    /// Login and lookup aliases
    ShortNames,
    /// Display names
    FullNames,
    /// Email addresses
    EmailAddresses,
    /// Authentication secret
    Password,
}

impl FieldName {
    /// All fields the store understands, in canonical order.
    pub const ALL: [FieldName; 7] = [
        FieldName::Uid,
        FieldName::Guid,
        FieldName::RecordType,
        FieldName::ShortNames,
        FieldName::FullNames,
        FieldName::EmailAddresses,
        FieldName::Password,
    ];

    /// Canonical name, as used in exports and log output.
    pub const fn name(&self) -> &'static str {
        match self {
            FieldName::Uid => "uid",
            FieldName::Guid => "guid",
            FieldName::RecordType => "recordType",
            FieldName::ShortNames => "shortNames",
            FieldName::FullNames => "fullNames",
            FieldName::EmailAddresses => "emailAddresses",
            FieldName::Password => "password",
        }
    }

    /// Whether the field accumulates multiple values.
    pub const fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            FieldName::ShortNames | FieldName::FullNames | FieldName::EmailAddresses
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_valued_fields() {
        assert!(FieldName::ShortNames.is_multi_valued());
        assert!(FieldName::FullNames.is_multi_valued());
        assert!(FieldName::EmailAddresses.is_multi_valued());
        assert!(!FieldName::Uid.is_multi_valued());
        assert!(!FieldName::Guid.is_multi_valued());
        assert!(!FieldName::RecordType.is_multi_valued());
        assert!(!FieldName::Password.is_multi_valued());
    }

    #[test]
    fn test_canonical_names_match_serde() {
        for field in FieldName::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.name().to_string()));
        }
        for record_type in RecordType::ALL {
            let json = serde_json::to_value(record_type).unwrap();
            assert_eq!(
                json,
                serde_json::Value::String(record_type.name().to_string())
            );
        }
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(RecordType::User.to_string(), "user");
        assert_eq!(RecordType::Group.to_string(), "group");
        assert_eq!(FieldName::ShortNames.to_string(), "shortNames");
        assert_eq!(FieldName::EmailAddresses.to_string(), "emailAddresses");
    }
}
