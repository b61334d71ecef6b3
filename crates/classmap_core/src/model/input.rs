//! Input document model.
//!
//! # Responsibility
//! - Decode the `classes` mapping of a class document.
//! - Keep every class entry together with the literal key it was stored under.
//!
//! # Invariants
//! - `InputDocument::classes` follows the textual order of the source mapping.
//! - Keys are kept verbatim; integer parsing happens in the flattener so a
//!   malformed key is reported with its original spelling.
//! - A repeated key keeps its first position and its last record.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt::Formatter;

/// Decoded class document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputDocument {
    /// Serialized as a JSON object keyed by stringified class id.
    #[serde(deserialize_with = "deserialize_class_entries")]
    pub classes: Vec<ClassEntry>,
}

impl InputDocument {
    /// Builds a document from already-keyed entries.
    pub fn new(classes: Vec<ClassEntry>) -> Self {
        Self { classes }
    }
}

/// One `key -> record` pair from the `classes` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    /// Literal mapping key, expected to be the decimal form of `record.id`.
    pub key: String,
    pub record: ClassRecord,
}

impl ClassEntry {
    pub fn new(key: impl Into<String>, record: ClassRecord) -> Self {
        Self {
            key: key.into(),
            record,
        }
    }
}

/// Class declaration with its ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassRecord {
    pub id: i64,
    pub name: String,
    pub attributes: Vec<AttributeSpec>,
}

impl ClassRecord {
    pub fn new(id: i64, name: impl Into<String>, attributes: Vec<AttributeSpec>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
        }
    }
}

/// Attribute declaration as it appears in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeSpec {
    pub id: i64,
    pub name: String,
    /// Serialized as `virtual`, which is a reserved word in Rust.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

impl AttributeSpec {
    pub fn new(id: i64, name: impl Into<String>, is_virtual: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_virtual,
        }
    }
}

fn deserialize_class_entries<'de, D>(deserializer: D) -> Result<Vec<ClassEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(ClassEntriesVisitor)
}

struct ClassEntriesVisitor;

impl<'de> Visitor<'de> for ClassEntriesVisitor {
    type Value = Vec<ClassEntry>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a mapping from class key to class record")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<ClassEntry> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut index_by_key = HashMap::<String, usize>::new();
        while let Some((key, record)) = map.next_entry::<String, ClassRecord>()? {
            match index_by_key.get(key.as_str()) {
                Some(&index) => entries[index].record = record,
                None => {
                    index_by_key.insert(key.clone(), entries.len());
                    entries.push(ClassEntry { key, record });
                }
            }
        }
        Ok(entries)
    }
}
