//! Field index invariants and the query layer built on them.

mod common;

use common::{DirectoryDoc, RecordDoc, init_logging};
use dirstore::{
    DirectoryError, DirectoryService, FieldName, INDEXED_FIELDS, InMemorySource, RecordType,
    XmlDirectoryService, parse_directory,
};
use proptest::prelude::*;

fn service(document: &str) -> XmlDirectoryService<InMemorySource> {
    XmlDirectoryService::new(InMemorySource::new(document))
}

fn mixed_directory() -> String {
    DirectoryDoc::new("Index Test")
        .record(
            RecordDoc::new()
                .uid("u1")
                .guid("9d2a0e3f")
                .short_name("alice")
                .short_name("al")
                .full_name("Alice Doe")
                .email("alice@example.com")
                .email("adoe@example.com")
                .password("s3cret"),
        )
        .record(
            RecordDoc::new()
                .uid("u2")
                .short_name("bob")
                .email("bob@example.com"),
        )
        .record(
            RecordDoc::typed("group")
                .uid("staff")
                .short_name("staff")
                .full_name("All Staff"),
        )
        .build()
}

#[test]
fn every_indexed_value_maps_back_to_its_record() {
    init_logging();
    let service = service(&mixed_directory());
    for record in service.records().unwrap() {
        for field in INDEXED_FIELDS {
            for value in record.values(field) {
                let found = service.records_with_field_value(field, value).unwrap();
                assert!(
                    found.contains(&record),
                    "{field} '{value}' should find record {record}"
                );
            }
        }
    }
}

#[test]
fn record_type_is_indexed_under_its_token() {
    let service = service(&mixed_directory());
    assert_eq!(
        service
            .records_with_field_value(FieldName::RecordType, "user")
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        service
            .records_with_record_type(RecordType::Group)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn multi_valued_fields_index_each_value_separately() {
    let service = service(&mixed_directory());
    let alice = service.record_with_uid("u1").unwrap().unwrap();
    for name in ["alice", "al"] {
        assert_eq!(service.records_with_short_name(name).unwrap(), [alice.clone()]);
    }
    for email in ["alice@example.com", "adoe@example.com"] {
        assert_eq!(
            service.records_with_email_address(email).unwrap(),
            [alice.clone()]
        );
    }
}

#[test]
fn unindexed_fields_are_not_queryable() {
    let service = service(&mixed_directory());
    assert!(
        service
            .records_with_field_value(FieldName::FullNames, "Alice Doe")
            .unwrap()
            .is_empty()
    );
    assert!(
        service
            .records_with_field_value(FieldName::Password, "s3cret")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn absent_field_contributes_no_index_entries() {
    let service = service(&mixed_directory());
    // Only u1 carries a guid; the others must not surface under any guid key.
    assert!(service.record_with_guid("").unwrap().is_none());
    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.index().value_count(FieldName::Guid), 1);
}

#[test]
fn present_but_empty_value_is_a_valid_index_key() {
    let document = DirectoryDoc::new("Test")
        .record(RecordDoc::new().uid("").short_name("ghost"))
        .build();
    let service = service(&document);
    let record = service.record_with_uid("").unwrap().unwrap();
    assert_eq!(record.short_names(), ["ghost"]);
}

#[test]
fn shared_values_return_every_holder() {
    let document = DirectoryDoc::new("Test")
        .record(RecordDoc::new().uid("u1").short_name("admin"))
        .record(RecordDoc::new().uid("u2").short_name("admin"))
        .build();
    let service = service(&document);
    assert_eq!(service.records_with_short_name("admin").unwrap().len(), 2);
}

#[test]
fn duplicate_uid_makes_unique_lookup_ambiguous() {
    let document = DirectoryDoc::new("Test")
        .record(RecordDoc::new().uid("u1").short_name("alice"))
        .record(RecordDoc::new().uid("u1").short_name("bob"))
        .build();
    let service = service(&document);
    let error = service.record_with_uid("u1").unwrap_err();
    assert!(matches!(
        error,
        DirectoryError::AmbiguousLookup { field: FieldName::Uid, ref value } if value == "u1"
    ));
    // Non-unique lookups over the same data still answer.
    assert_eq!(
        service
            .records_with_field_value(FieldName::Uid, "u1")
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn missing_values_answer_empty_not_error() {
    let service = service(&mixed_directory());
    assert!(service.record_with_uid("nobody").unwrap().is_none());
    assert!(service.records_with_short_name("nobody").unwrap().is_empty());
    assert!(
        service
            .records_with_email_address("nobody@example.com")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn index_stats_cover_all_indexed_fields() {
    let service = service(&mixed_directory());
    let snapshot = service.snapshot().unwrap();
    let stats = snapshot.index().stats();
    assert_eq!(stats.values_per_field.len(), INDEXED_FIELDS.len());
    assert_eq!(stats.values_per_field[&FieldName::Uid], 3);
    assert_eq!(stats.values_per_field[&FieldName::RecordType], 2);
    // staff appears as a short name once; alice, al, bob as well.
    assert_eq!(stats.values_per_field[&FieldName::ShortNames], 4);
}

fn token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

prop_compose! {
    fn record_spec()(
        is_group in any::<bool>(),
        uid in token(),
        short_names in prop::collection::vec(token(), 0..3),
        emails in prop::collection::vec(token(), 0..3),
    ) -> RecordDoc {
        let mut record = if is_group {
            RecordDoc::typed("group")
        } else {
            RecordDoc::new()
        };
        record = record.uid(&uid);
        for name in &short_names {
            record = record.short_name(name);
        }
        for email in &emails {
            record = record.element("email", &format!("{email}@example.com"));
        }
        record
    }
}

proptest! {
    #[test]
    fn generated_directories_satisfy_the_index_invariant(
        realm in "[A-Za-z][A-Za-z0-9 ]{0,15}",
        specs in prop::collection::vec(record_spec(), 0..12),
    ) {
        let mut doc = DirectoryDoc::new(realm.trim_end());
        prop_assume!(!realm.trim_end().is_empty());
        for spec in specs {
            doc = doc.record(spec);
        }
        let service = service(&doc.build());

        prop_assert_eq!(service.realm_name().unwrap(), realm.trim_end());
        for record in service.records().unwrap() {
            for field in INDEXED_FIELDS {
                for value in record.values(field) {
                    let found = service.records_with_field_value(field, value).unwrap();
                    prop_assert!(found.contains(&record));
                }
            }
        }
    }

    #[test]
    fn parser_never_panics_on_arbitrary_input(input in "\\PC*") {
        let _ = parse_directory(input.as_bytes());
    }

    #[test]
    fn parser_never_panics_on_arbitrary_bytes(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = parse_directory(&input);
    }
}
