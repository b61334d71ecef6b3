//! Traversal and regrouping stages.
//!
//! # Responsibility
//! - Flatten class entries into per-attribute records.
//! - Regroup records into virtual / non-virtual buckets keyed by class name.
//!
//! # Invariants
//! - Both stages preserve input order; neither keeps state between calls.
//! - Only the flattener can fail, and only on a non-integer class key.

pub mod diagnostics;
pub mod flatten;
pub mod group;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TransformResult<T> = Result<T, TransformError>;

/// Fatal transformation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Class key cannot be parsed as an integer.
    MalformedKey { key: String },
}

impl Display for TransformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedKey { key } => {
                write!(f, "class key `{key}` is not an integer")
            }
        }
    }
}

impl Error for TransformError {}
