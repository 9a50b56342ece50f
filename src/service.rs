//! The query surface of a directory service.
//!
//! [`DirectoryService`] is the trait consumers program against: exact-value
//! lookups answered from the field index, plus the realm name and record
//! enumeration. Every operation may trigger the lazy load, so every
//! operation returns a [`DirectoryResult`].

use crate::error::{DirectoryError, DirectoryResult};
use crate::record::DirectoryRecord;
use crate::schema::{FieldName, RecordType, xml};
use std::sync::Arc;

/// Read-only queries over a loaded directory.
///
/// The provided methods are all expressed through
/// [`records_with_field_value`](Self::records_with_field_value), so an
/// implementation only has to supply the three required reads.
pub trait DirectoryService {
    /// The realm the service answers for.
    fn realm_name(&self) -> DirectoryResult<String>;

    /// Every record in the directory.
    fn records(&self) -> DirectoryResult<Vec<Arc<DirectoryRecord>>>;

    /// The records holding `value` for an indexed `field`.
    ///
    /// Answered from the field index in O(1); an unindexed field or a value
    /// no record holds yields an empty result, not an error.
    fn records_with_field_value(
        &self,
        field: FieldName,
        value: &str,
    ) -> DirectoryResult<Vec<Arc<DirectoryRecord>>>;

    /// Every record of one record type.
    fn records_with_record_type(
        &self,
        record_type: RecordType,
    ) -> DirectoryResult<Vec<Arc<DirectoryRecord>>> {
        self.records_with_field_value(FieldName::RecordType, xml::value_for_record_type(record_type))
    }

    /// The record with this uid, or `None`.
    ///
    /// Uids are expected to be unique per principal; finding several records
    /// is a [`DirectoryError::AmbiguousLookup`].
    fn record_with_uid(&self, uid: &str) -> DirectoryResult<Option<Arc<DirectoryRecord>>> {
        unique_record(
            self.records_with_field_value(FieldName::Uid, uid)?,
            FieldName::Uid,
            uid,
        )
    }

    /// The record with this guid, or `None`.
    ///
    /// Guids are expected to be unique per principal; finding several
    /// records is a [`DirectoryError::AmbiguousLookup`].
    fn record_with_guid(&self, guid: &str) -> DirectoryResult<Option<Arc<DirectoryRecord>>> {
        unique_record(
            self.records_with_field_value(FieldName::Guid, guid)?,
            FieldName::Guid,
            guid,
        )
    }

    /// Every record carrying this short name.
    fn records_with_short_name(
        &self,
        short_name: &str,
    ) -> DirectoryResult<Vec<Arc<DirectoryRecord>>> {
        self.records_with_field_value(FieldName::ShortNames, short_name)
    }

    /// Every record carrying this email address.
    fn records_with_email_address(
        &self,
        email_address: &str,
    ) -> DirectoryResult<Vec<Arc<DirectoryRecord>>> {
        self.records_with_field_value(FieldName::EmailAddresses, email_address)
    }
}

fn unique_record(
    mut matches: Vec<Arc<DirectoryRecord>>,
    field: FieldName,
    value: &str,
) -> DirectoryResult<Option<Arc<DirectoryRecord>>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(DirectoryError::ambiguous_lookup(field, value)),
    }
}
