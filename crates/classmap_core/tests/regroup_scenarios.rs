use classmap_core::{
    flatten, group, transform_document, AttributeRecord, InputDocument, NoopDiagnostics,
    OutputDocument, RecordingDiagnostics, TransformError,
};
use serde_json::json;
use std::collections::HashSet;

fn parse(raw: &str) -> InputDocument {
    serde_json::from_str(raw).expect("fixture should decode")
}

fn regroup(raw: &str) -> serde_json::Value {
    let document = parse(raw);
    let records = flatten(&document, &mut NoopDiagnostics).expect("flatten should succeed");
    serde_json::to_value(group(records)).unwrap()
}

const MIXED_FIXTURE: &str = r#"{
    "classes": {
        "3": {"id": 3, "name": "Bar", "attributes": [
            {"id": 30, "name": "b1", "virtual": false},
            {"id": 31, "name": "b2", "virtual": true}
        ]},
        "1": {"id": 2, "name": "Ghost", "attributes": [
            {"id": 10, "name": "g", "virtual": true}
        ]},
        "4": {"id": 4, "name": "Qux", "attributes": [
            {"id": 40, "name": "q", "virtual": true}
        ]},
        "5": {"id": 5, "name": "Bar", "attributes": [
            {"id": 50, "name": "b3", "virtual": false}
        ]}
    }
}"#;

#[test]
fn single_virtual_attribute_lands_in_virtual_bucket() {
    let output = regroup(
        r#"{"classes": {"0": {"id": 0, "name": "Foo", "attributes": [{"id": 1, "name": "a", "virtual": true}]}}}"#,
    );

    assert_eq!(
        output,
        json!({
            "classes_with_virtual_attributes": [
                {"name": "Foo", "attributes": [{"name": "a", "id": 1}]}
            ],
            "classes_without_virtual_attributes": []
        })
    );
}

#[test]
fn classes_sharing_a_name_merge_in_arrival_order() {
    let output = regroup(
        r#"{"classes": {
            "1": {"id": 1, "name": "Bar", "attributes": [{"id": 11, "name": "x", "virtual": false}]},
            "2": {"id": 2, "name": "Bar", "attributes": [
                {"id": 21, "name": "y", "virtual": false},
                {"id": 22, "name": "z", "virtual": false}
            ]}
        }}"#,
    );

    assert_eq!(
        output,
        json!({
            "classes_with_virtual_attributes": [],
            "classes_without_virtual_attributes": [
                {"name": "Bar", "attributes": [
                    {"name": "x", "id": 11},
                    {"name": "y", "id": 21},
                    {"name": "z", "id": 22}
                ]}
            ]
        })
    );
}

#[test]
fn mismatched_key_is_skipped_and_reported() {
    let document = parse(
        r#"{"classes": {"1": {"id": 2, "name": "Foo", "attributes": [{"id": 1, "name": "a", "virtual": true}]}}}"#,
    );
    let mut diagnostics = RecordingDiagnostics::new();

    let records = flatten(&document, &mut diagnostics).expect("flatten should succeed");

    assert!(records.is_empty());
    assert_eq!(group(records), OutputDocument::default());
    assert_eq!(diagnostics.mismatches().len(), 1);
    assert_eq!(diagnostics.mismatches()[0].key, "1");
    assert_eq!(diagnostics.mismatches()[0].id, 2);
}

#[test]
fn attributes_route_by_their_own_virtual_flag() {
    let output = regroup(
        r#"{"classes": {"7": {"id": 7, "name": "Mixed", "attributes": [
            {"id": 1, "name": "v", "virtual": true},
            {"id": 2, "name": "n", "virtual": false}
        ]}}}"#,
    );

    assert_eq!(
        output,
        json!({
            "classes_with_virtual_attributes": [
                {"name": "Mixed", "attributes": [{"name": "v", "id": 1}]}
            ],
            "classes_without_virtual_attributes": [
                {"name": "Mixed", "attributes": [{"name": "n", "id": 2}]}
            ]
        })
    );
}

#[test]
fn empty_classes_produce_empty_buckets() {
    let output = regroup(r#"{"classes": {}}"#);
    assert_eq!(
        output,
        json!({
            "classes_with_virtual_attributes": [],
            "classes_without_virtual_attributes": []
        })
    );
}

#[test]
fn grouping_is_deterministic() {
    let document = parse(MIXED_FIXTURE);
    let records = flatten(&document, &mut NoopDiagnostics).expect("flatten should succeed");

    assert_eq!(group(records.clone()), group(records));
}

#[test]
fn every_accepted_attribute_appears_exactly_once_in_its_bucket() {
    let document = parse(MIXED_FIXTURE);
    let records: Vec<AttributeRecord> =
        flatten(&document, &mut NoopDiagnostics).expect("flatten should succeed");
    let output = group(records.clone());

    let total_input: usize = document
        .classes
        .iter()
        .map(|entry| entry.record.attributes.len())
        .sum();
    // "Ghost" is skipped because its key and id disagree.
    assert_eq!(output.attribute_count(), total_input - 1);
    assert_eq!(output.attribute_count(), records.len());

    for record in &records {
        let hits: usize = [true, false]
            .iter()
            .flat_map(|flag| output.bucket(*flag).iter().map(move |group| (*flag, group)))
            .filter(|(_, group)| group.name == record.class_name)
            .flat_map(|(flag, group)| group.attributes.iter().map(move |attr| (flag, attr)))
            .filter(|(flag, attr)| {
                *flag == record.is_virtual
                    && attr.id == record.attribute_id
                    && attr.name == record.attribute_name
            })
            .count();
        assert_eq!(hits, 1, "record {record:?} should appear exactly once");
    }
}

#[test]
fn group_names_are_unique_and_ordered_by_first_arrival() {
    let output = group(
        flatten(&parse(MIXED_FIXTURE), &mut NoopDiagnostics).expect("flatten should succeed"),
    );

    for flag in [true, false] {
        let names: Vec<&str> = output
            .bucket(flag)
            .iter()
            .map(|group| group.name.as_str())
            .collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({
            "classes_with_virtual_attributes": [
                {"name": "Bar", "attributes": [{"name": "b2", "id": 31}]},
                {"name": "Qux", "attributes": [{"name": "q", "id": 40}]}
            ],
            "classes_without_virtual_attributes": [
                {"name": "Bar", "attributes": [
                    {"name": "b1", "id": 30},
                    {"name": "b3", "id": 50}
                ]}
            ]
        })
    );
}

#[test]
fn malformed_key_is_fatal() {
    let document = parse(r#"{"classes": {"x1": {"id": 1, "name": "Foo", "attributes": []}}}"#);
    let err = transform_document(&document, &mut NoopDiagnostics).unwrap_err();
    assert_eq!(
        err,
        TransformError::MalformedKey {
            key: "x1".to_string()
        }
    );
}

#[test]
fn transform_report_counts_skipped_classes() {
    let document = parse(MIXED_FIXTURE);
    let (_, report) =
        transform_document(&document, &mut NoopDiagnostics).expect("transform should succeed");

    assert_eq!(report.classes_seen, 4);
    assert_eq!(report.classes_skipped, 1);
    assert_eq!(report.records, 4);
    assert_eq!(report.virtual_groups, 2);
    assert_eq!(report.non_virtual_groups, 1);
}

#[test]
fn repeated_class_key_contributes_only_its_last_record() {
    let output = regroup(
        r#"{"classes": {
            "1": {"id": 1, "name": "Old", "attributes": [{"id": 1, "name": "stale", "virtual": false}]},
            "1": {"id": 1, "name": "New", "attributes": [{"id": 2, "name": "fresh", "virtual": false}]}
        }}"#,
    );

    assert_eq!(
        output,
        json!({
            "classes_with_virtual_attributes": [],
            "classes_without_virtual_attributes": [
                {"name": "New", "attributes": [{"name": "fresh", "id": 2}]}
            ]
        })
    );
}

#[test]
fn key_beyond_integer_range_is_skipped_not_fatal() {
    let document = parse(
        r#"{"classes": {
            "99999999999999999999": {"id": 1, "name": "Huge", "attributes": [{"id": 1, "name": "h", "virtual": true}]},
            "2": {"id": 2, "name": "Kept", "attributes": [{"id": 2, "name": "k", "virtual": true}]}
        }}"#,
    );
    let mut diagnostics = RecordingDiagnostics::new();

    let (output, report) =
        transform_document(&document, &mut diagnostics).expect("transform should succeed");

    assert_eq!(report.classes_skipped, 1);
    assert_eq!(diagnostics.mismatches()[0].key, "99999999999999999999");
    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({
            "classes_with_virtual_attributes": [
                {"name": "Kept", "attributes": [{"name": "k", "id": 2}]}
            ],
            "classes_without_virtual_attributes": []
        })
    );
}
