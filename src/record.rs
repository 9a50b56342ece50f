//! Directory records and their field values.
//!
//! [`DirectoryRecord`] is a value object: records compare and hash by
//! content, so a set of records collapses identical entries no matter where
//! in a document they appeared. Records are immutable once built; the only
//! way to assemble one is through [`RecordFields`], which enforces the
//! single- versus multi-valued arity rules as values arrive.
//!
//! # Examples
//!
//! ```rust
//! use dirstore::{DirectoryRecord, FieldName, RecordFields, RecordType};
//!
//! let mut fields = RecordFields::new();
//! fields.push(FieldName::Uid, "u1");
//! fields.push(FieldName::ShortNames, "alice");
//! fields.push(FieldName::ShortNames, "al");
//!
//! let record = DirectoryRecord::new(RecordType::User, fields);
//! assert_eq!(record.uid(), Some("u1"));
//! assert_eq!(record.short_names(), ["alice", "al"]);
//! ```

use crate::schema::{FieldName, RecordType};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::slice;

/// The value(s) held by one field of a record.
///
/// Single-valued fields hold exactly one string. Multi-valued fields hold
/// their values in document order, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldValue {
    /// The value of a single-valued field
    Single(String),
    /// The values of a multi-valued field, in document order
    Multi(Vec<String>),
}

impl FieldValue {
    /// The values as a slice, regardless of arity.
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::Single(value) => slice::from_ref(value),
            FieldValue::Multi(values) => values,
        }
    }

    /// The value of a single-valued field, or `None` for a multi-valued one.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value),
            FieldValue::Multi(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Single(value) => serializer.serialize_str(value),
            FieldValue::Multi(values) => values.serialize(serializer),
        }
    }
}

/// Accumulates field values while a record is being read.
///
/// [`push`](Self::push) applies the arity rules: a single-valued field keeps
/// the last value pushed, a multi-valued field appends every value in order.
/// This is the only way to populate a record's field map, so a [`FieldValue::Multi`]
/// entry can never appear under a single-valued field or vice versa.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    fields: BTreeMap<FieldName, FieldValue>,
}

impl RecordFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a field.
    pub fn push(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        if field.is_multi_valued() {
            if let FieldValue::Multi(values) = self
                .fields
                .entry(field)
                .or_insert_with(|| FieldValue::Multi(Vec::new()))
            {
                values.push(value);
            }
        } else {
            self.fields.insert(field, FieldValue::Single(value));
        }
    }

    /// Whether any field has been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_map(self) -> BTreeMap<FieldName, FieldValue> {
        self.fields
    }
}

/// One principal: a record type plus the fields read for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryRecord {
    record_type: RecordType,
    fields: BTreeMap<FieldName, FieldValue>,
}

impl DirectoryRecord {
    /// Build a record from accumulated fields.
    pub fn new(record_type: RecordType, fields: RecordFields) -> Self {
        Self {
            record_type,
            fields: fields.into_map(),
        }
    }

    /// The kind of principal this record describes.
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// The value(s) of one field, or `None` if the record does not carry it.
    ///
    /// [`FieldName::RecordType`] is not held in the field map; use
    /// [`record_type`](Self::record_type) for it.
    pub fn field(&self, field: FieldName) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// The values of one field as a slice; empty if the record does not
    /// carry the field.
    pub fn values(&self, field: FieldName) -> &[String] {
        self.field(field).map(FieldValue::values).unwrap_or_default()
    }

    /// Iterate over the fields the record carries, in canonical field order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Stable unique identifier, if the record carries one.
    pub fn uid(&self) -> Option<&str> {
        self.single_value(FieldName::Uid)
    }

    /// Globally unique identifier, if the record carries one.
    pub fn guid(&self) -> Option<&str> {
        self.single_value(FieldName::Guid)
    }

    /// Login and lookup aliases, in document order.
    pub fn short_names(&self) -> &[String] {
        self.values(FieldName::ShortNames)
    }

    /// Display names, in document order.
    pub fn full_names(&self) -> &[String] {
        self.values(FieldName::FullNames)
    }

    /// Email addresses, in document order.
    pub fn email_addresses(&self) -> &[String] {
        self.values(FieldName::EmailAddresses)
    }

    /// Authentication secret, if the record carries one.
    pub fn password(&self) -> Option<&str> {
        self.single_value(FieldName::Password)
    }

    fn single_value(&self, field: FieldName) -> Option<&str> {
        self.field(field).and_then(FieldValue::as_single)
    }
}

impl fmt::Display for DirectoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uid() {
            Some(uid) => write!(f, "({}){}", self.record_type, uid),
            None => write!(f, "({})<no uid>", self.record_type),
        }
    }
}

impl Serialize for DirectoryRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(&FieldName::RecordType, &self.record_type)?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}
