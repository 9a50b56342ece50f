//! Parsing of directory documents.
//!
//! [`parse_directory`] turns the raw bytes of a directory document into a
//! [`ParsedDirectory`]: the realm name, the record set, and the tokens the
//! schema did not recognize. Parsing is tolerant of unknown field elements
//! (recorded, then skipped) but strict about document structure: bad XML,
//! a wrong root element, or a missing realm fail the whole parse and yield
//! no partial data.

use crate::error::{StructuralError, StructuralResult};
use crate::record::{DirectoryRecord, RecordFields};
use crate::schema::xml;
use log::{debug, warn};
use roxmltree::Document;
use std::collections::HashSet;

/// Everything one successful parse produces.
#[derive(Debug, Clone)]
pub struct ParsedDirectory {
    /// Value of the root element's `realm` attribute.
    pub realm_name: String,
    /// The materialized records, duplicates collapsed by value.
    pub records: HashSet<DirectoryRecord>,
    /// `type` attribute values with no [`RecordType`](crate::RecordType) mapping.
    pub unknown_record_types: HashSet<String>,
    /// Field element tags with no [`FieldName`](crate::FieldName) mapping.
    pub unknown_field_names: HashSet<String>,
}

/// Parse the bytes of a directory document.
///
/// Fails with a [`StructuralError`] when the bytes are not valid UTF-8, the
/// document is not well-formed XML, the root element is not `directory`, or
/// the `realm` attribute is missing or empty.
pub fn parse_directory(bytes: &[u8]) -> StructuralResult<ParsedDirectory> {
    let text = std::str::from_utf8(bytes)?;
    let document = Document::parse(text)?;

    let root = document.root_element();
    let root_tag = root.tag_name().name();
    if root_tag != xml::DIRECTORY_ELEMENT {
        return Err(StructuralError::incorrect_root_element(root_tag));
    }
    let realm_name = match root.attribute(xml::REALM_ATTRIBUTE) {
        Some(realm) if !realm.is_empty() => realm.to_string(),
        _ => return Err(StructuralError::MissingRealmName),
    };

    let mut records = HashSet::new();
    let mut unknown_record_types = HashSet::new();
    let mut unknown_field_names = HashSet::new();

    // Every direct child element of the root is a record candidate; the
    // child's own tag is not checked, matching the historical format.
    let candidates: Vec<_> = root.children().filter(|node| node.is_element()).collect();
    for (position, candidate) in candidates.iter().enumerate() {
        // An empty `type` attribute counts as absent; both default to user.
        let type_token = candidate
            .attribute(xml::RECORD_TYPE_ATTRIBUTE)
            .filter(|token| !token.is_empty())
            .unwrap_or(xml::value_for_record_type(xml::DEFAULT_RECORD_TYPE));
        let Some(record_type) = xml::record_type_for_value(type_token) else {
            // Compatibility quirk: the first unknown record type stops record
            // processing for the entire document. Later siblings are not
            // parsed and contribute no diagnostics either. See DESIGN.md
            // before changing this to a per-record skip.
            warn!(
                "unknown record type '{}' in realm '{}', skipping the remaining {} record candidate(s)",
                type_token,
                realm_name,
                candidates.len() - position - 1,
            );
            unknown_record_types.insert(type_token.to_string());
            break;
        };

        let mut fields = RecordFields::new();
        for child in candidate.children().filter(|node| node.is_element()) {
            let tag = child.tag_name().name();
            match xml::field_for_element(tag) {
                // An empty element is a present-but-empty value, not an
                // absent field.
                Some(field) => fields.push(field, child.text().unwrap_or_default()),
                None => {
                    debug!("unknown field element '{}' in realm '{}'", tag, realm_name);
                    unknown_field_names.insert(tag.to_string());
                }
            }
        }
        records.insert(DirectoryRecord::new(record_type, fields));
    }

    Ok(ParsedDirectory {
        realm_name,
        records,
        unknown_record_types,
        unknown_field_names,
    })
}
