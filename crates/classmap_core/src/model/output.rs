//! Two-bucket output document model.
//!
//! # Invariants
//! - Field order on the wire is fixed by declaration order below.
//! - Group names are unique within each bucket (enforced by the grouper).

use serde::{Deserialize, Serialize};

/// Regrouped document written as the pipeline result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub classes_with_virtual_attributes: Vec<Group>,
    pub classes_without_virtual_attributes: Vec<Group>,
}

impl OutputDocument {
    /// Returns the bucket selected by a virtual flag.
    pub fn bucket(&self, is_virtual: bool) -> &[Group] {
        if is_virtual {
            &self.classes_with_virtual_attributes
        } else {
            &self.classes_without_virtual_attributes
        }
    }

    /// Total number of attributes across both buckets.
    pub fn attribute_count(&self) -> usize {
        self.classes_with_virtual_attributes
            .iter()
            .chain(self.classes_without_virtual_attributes.iter())
            .map(|group| group.attributes.len())
            .sum()
    }
}

/// Attributes collected under one class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub attributes: Vec<GroupedAttribute>,
}

/// Attribute entry inside a group, serialized as `{"name": .., "id": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedAttribute {
    pub name: String,
    pub id: i64,
}

impl GroupedAttribute {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
