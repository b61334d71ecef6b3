//! Class entry traversal.
//!
//! # Responsibility
//! - Validate that every class key matches its declared id.
//! - Emit one `AttributeRecord` per attribute of every accepted class.
//!
//! # Invariants
//! - Records follow class order, then attribute order within a class.
//! - A mismatched class contributes no records and is reported once.
//! - A non-integer key aborts the traversal; no partial result is returned.
//! - An integer key outside the `i64` range can never equal an id and is
//!   treated as a mismatch.

use super::diagnostics::Diagnostics;
use super::{TransformError, TransformResult};
use crate::model::input::{ClassEntry, InputDocument};
use crate::model::record::AttributeRecord;
use log::debug;
use std::num::IntErrorKind;

/// Counters and accepted class names collected during one traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    pub classes_seen: usize,
    pub classes_accepted: usize,
    pub classes_skipped: usize,
    /// Names of accepted classes, one per accepted entry, in document order.
    pub accepted_class_names: Vec<String>,
}

/// Flattens a class document into attribute records.
///
/// # Errors
/// - Returns `TransformError::MalformedKey` for the first key that is not an
///   integer.
pub fn flatten<D>(
    document: &InputDocument,
    diagnostics: &mut D,
) -> TransformResult<Vec<AttributeRecord>>
where
    D: Diagnostics + ?Sized,
{
    flatten_with_summary(document, diagnostics).map(|(records, _)| records)
}

/// Same as [`flatten`], also returning traversal counters.
pub fn flatten_with_summary<D>(
    document: &InputDocument,
    diagnostics: &mut D,
) -> TransformResult<(Vec<AttributeRecord>, FlattenSummary)>
where
    D: Diagnostics + ?Sized,
{
    let mut records = Vec::new();
    let mut summary = FlattenSummary::default();

    for entry in &document.classes {
        summary.classes_seen += 1;
        let key_id = parse_class_key(&entry.key)?;
        if key_id != Some(entry.record.id) {
            diagnostics.key_mismatch(&entry.key, entry.record.id);
            summary.classes_skipped += 1;
            continue;
        }

        summary.classes_accepted += 1;
        summary.accepted_class_names.push(entry.record.name.clone());
        push_class_records(entry, &mut records);
    }

    debug!(
        "event=flatten module=transform status=ok classes_seen={} classes_skipped={} records={}",
        summary.classes_seen,
        summary.classes_skipped,
        records.len()
    );
    Ok((records, summary))
}

fn push_class_records(entry: &ClassEntry, records: &mut Vec<AttributeRecord>) {
    let class = &entry.record;
    records.extend(class.attributes.iter().map(|attribute| {
        AttributeRecord::new(
            attribute.id,
            attribute.name.as_str(),
            attribute.is_virtual,
            class.name.as_str(),
        )
    }));
}

// Surrounding whitespace is tolerated; fractions and digit separators are not.
// `None` marks an integer that does not fit in `i64`.
fn parse_class_key(key: &str) -> TransformResult<Option<i64>> {
    match key.trim().parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Ok(None),
            _ => Err(TransformError::MalformedKey {
                key: key.to_string(),
            }),
        },
    }
}
