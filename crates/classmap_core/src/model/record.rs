//! Flattened per-attribute record.

/// One attribute together with the name of the class that declared it.
///
/// Produced by the flattener and consumed once by the grouper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub attribute_id: i64,
    pub attribute_name: String,
    /// Copied from the attribute's own `virtual` flag; selects the bucket.
    pub is_virtual: bool,
    pub class_name: String,
}

impl AttributeRecord {
    pub fn new(
        attribute_id: i64,
        attribute_name: impl Into<String>,
        is_virtual: bool,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            attribute_id,
            attribute_name: attribute_name.into(),
            is_virtual,
            class_name: class_name.into(),
        }
    }
}
