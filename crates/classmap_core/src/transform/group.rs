//! Regrouping of attribute records into two buckets.
//!
//! # Responsibility
//! - Route each record to the virtual or non-virtual bucket by its own flag.
//! - Merge records sharing a class name into one group per bucket.
//!
//! # Invariants
//! - The first record carrying a class name fixes that group's position.
//! - Attributes inside a group keep arrival order.
//! - No two groups in one bucket share a name.

use crate::model::output::{Group, GroupedAttribute, OutputDocument};
use crate::model::record::AttributeRecord;
use std::collections::HashMap;

/// Builds the output document from flattened records.
///
/// Pure function: the same record sequence always yields the same document.
pub fn group<I>(records: I) -> OutputDocument
where
    I: IntoIterator<Item = AttributeRecord>,
{
    let mut with_virtual = Bucket::default();
    let mut without_virtual = Bucket::default();

    for record in records {
        let bucket = if record.is_virtual {
            &mut with_virtual
        } else {
            &mut without_virtual
        };
        bucket.push(record);
    }

    OutputDocument {
        classes_with_virtual_attributes: with_virtual.into_groups(),
        classes_without_virtual_attributes: without_virtual.into_groups(),
    }
}

/// Insertion-ordered groups plus a name index for constant-time merges.
#[derive(Default)]
struct Bucket {
    groups: Vec<Group>,
    index_by_name: HashMap<String, usize>,
}

impl Bucket {
    fn push(&mut self, record: AttributeRecord) {
        let attribute = GroupedAttribute::new(record.attribute_name, record.attribute_id);
        match self.index_by_name.get(record.class_name.as_str()) {
            Some(&index) => self.groups[index].attributes.push(attribute),
            None => {
                self.index_by_name
                    .insert(record.class_name.clone(), self.groups.len());
                self.groups.push(Group {
                    name: record.class_name,
                    attributes: vec![attribute],
                });
            }
        }
    }

    fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}
