//! Core regrouping logic for classmap.
//! Reads class documents, flattens their attributes and regroups them by
//! class name into virtual / non-virtual buckets.

pub mod document;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod transform;

pub use document::{
    read_document, write_document, DocumentError, DocumentResult, DEFAULT_INPUT_PATH,
    DEFAULT_OUTPUT_PATH,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::input::{AttributeSpec, ClassEntry, ClassRecord, InputDocument};
pub use model::output::{Group, GroupedAttribute, OutputDocument};
pub use model::record::AttributeRecord;
pub use pipeline::{run_pipeline, transform_document, PipelineError, PipelineReport};
pub use transform::diagnostics::{
    Diagnostics, KeyMismatch, LogDiagnostics, NoopDiagnostics, RecordingDiagnostics,
};
pub use transform::flatten::{flatten, flatten_with_summary, FlattenSummary};
pub use transform::group::group;
pub use transform::{TransformError, TransformResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
