//! The field index: exact-value lookup over the loaded record set.
//!
//! A [`FieldIndex`] maps each indexed field to a table from field value to
//! the set of records holding that value, giving O(1) lookups for the
//! queries the directory service answers. The index is rebuilt wholesale on
//! every load; it is never updated incrementally.

use crate::record::DirectoryRecord;
use crate::schema::{FieldName, xml};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// The fields the store indexes, in index construction order.
///
/// Full names and passwords are deliberately not indexed: the former are not
/// lookup keys and the latter must not be.
pub const INDEXED_FIELDS: [FieldName; 5] = [
    FieldName::RecordType,
    FieldName::Uid,
    FieldName::Guid,
    FieldName::ShortNames,
    FieldName::EmailAddresses,
];

type ValueIndex = HashMap<String, HashSet<Arc<DirectoryRecord>>>;

/// Reverse mapping from field value to the records holding it.
///
/// Records are shared with the store's record set through `Arc`, so the
/// index adds no per-record allocation. Every record holding a value for an
/// indexed field appears under every one of its values; a present-but-empty
/// value is indexed under the empty string, while an absent field
/// contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    fields: HashMap<FieldName, ValueIndex>,
}

impl FieldIndex {
    /// Build the index for a record set.
    ///
    /// Every sub-index in [`INDEXED_FIELDS`] exists afterwards, even when no
    /// record feeds it.
    pub fn build(records: &HashSet<Arc<DirectoryRecord>>) -> Self {
        let mut fields = HashMap::with_capacity(INDEXED_FIELDS.len());
        for field in INDEXED_FIELDS {
            let mut values = ValueIndex::new();
            for record in records {
                if field == FieldName::RecordType {
                    // The record type is not in the field map; it indexes
                    // under its canonical attribute value.
                    insert(&mut values, xml::value_for_record_type(record.record_type()), record);
                    continue;
                }
                for value in record.values(field) {
                    insert(&mut values, value, record);
                }
            }
            fields.insert(field, values);
        }
        Self { fields }
    }

    /// The records holding `value` for `field`.
    ///
    /// Empty when the value is unknown or the field is not indexed.
    pub fn records_with_value<'a>(
        &'a self,
        field: FieldName,
        value: &str,
    ) -> impl Iterator<Item = &'a Arc<DirectoryRecord>> {
        self.fields
            .get(&field)
            .and_then(|values| values.get(value))
            .into_iter()
            .flatten()
    }

    /// Whether lookups on `field` are backed by a sub-index.
    pub fn is_indexed(field: FieldName) -> bool {
        INDEXED_FIELDS.contains(&field)
    }

    /// Distinct values indexed for `field`.
    pub fn value_count(&self, field: FieldName) -> usize {
        self.fields.get(&field).map_or(0, HashMap::len)
    }

    /// Size figures for the whole index.
    pub fn stats(&self) -> FieldIndexStats {
        let mut values_per_field = BTreeMap::new();
        let mut total_entries = 0;
        for (field, values) in &self.fields {
            values_per_field.insert(*field, values.len());
            total_entries += values.values().map(HashSet::len).sum::<usize>();
        }
        FieldIndexStats {
            values_per_field,
            total_entries,
        }
    }
}

fn insert(values: &mut ValueIndex, value: &str, record: &Arc<DirectoryRecord>) {
    values
        .entry(value.to_string())
        .or_default()
        .insert(Arc::clone(record));
}

/// Size figures for a built index, for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIndexStats {
    /// Distinct values per indexed field.
    pub values_per_field: BTreeMap<FieldName, usize>,
    /// Entries over all fields; a record counts once per value it is indexed
    /// under.
    pub total_entries: usize,
}
