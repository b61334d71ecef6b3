//! Domain model for class documents and their regrouped projection.
//!
//! # Responsibility
//! - Define the input shape decoded from class documents.
//! - Define the transient per-attribute record passed between stages.
//! - Define the two-bucket output shape written back to disk.
//!
//! # Invariants
//! - Input class entries keep the order they had in the source document.
//! - Output group names are unique within a bucket.

pub mod input;
pub mod output;
pub mod record;
