//! End-to-end regrouping run.
//!
//! # Responsibility
//! - Sequence read -> flatten -> group -> write for one input file.
//! - Report run counters to the caller.
//!
//! # Invariants
//! - The output file is only touched after the transformation succeeded, so
//!   a fatal error never leaves a fresh output behind.

use crate::document::{read_document, write_document, DocumentError};
use crate::model::input::InputDocument;
use crate::model::output::OutputDocument;
use crate::transform::diagnostics::Diagnostics;
use crate::transform::flatten::flatten_with_summary;
use crate::transform::group::group;
use crate::transform::TransformError;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal error for one pipeline run.
#[derive(Debug)]
pub enum PipelineError {
    Document(DocumentError),
    Transform(TransformError),
}

impl PipelineError {
    fn code(&self) -> &'static str {
        match self {
            Self::Document(err) => err.code(),
            Self::Transform(TransformError::MalformedKey { .. }) => "malformed_key",
        }
    }

    /// Whether the failing stage already emitted its own error event.
    fn logged_by_stage(&self) -> bool {
        matches!(self, Self::Document(_))
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document(err) => write!(f, "{err}"),
            Self::Transform(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            Self::Transform(err) => Some(err),
        }
    }
}

impl From<DocumentError> for PipelineError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<TransformError> for PipelineError {
    fn from(value: TransformError) -> Self {
        Self::Transform(value)
    }
}

/// Counters describing one successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub classes_seen: usize,
    pub classes_skipped: usize,
    pub records: usize,
    pub virtual_groups: usize,
    pub non_virtual_groups: usize,
}

/// Transforms an in-memory document without touching the filesystem.
pub fn transform_document<D>(
    document: &InputDocument,
    diagnostics: &mut D,
) -> Result<(OutputDocument, PipelineReport), TransformError>
where
    D: Diagnostics + ?Sized,
{
    let (records, summary) = flatten_with_summary(document, diagnostics)?;
    let record_count = records.len();
    let output = group(records);

    let report = PipelineReport {
        classes_seen: summary.classes_seen,
        classes_skipped: summary.classes_skipped,
        records: record_count,
        virtual_groups: output.classes_with_virtual_attributes.len(),
        non_virtual_groups: output.classes_without_virtual_attributes.len(),
    };
    Ok((output, report))
}

/// Reads `input`, regroups it and writes the result to `output`.
///
/// # Errors
/// - `PipelineError::Document` when the input cannot be loaded or the output
///   cannot be written.
/// - `PipelineError::Transform` when a class key is not an integer.
pub fn run_pipeline<D>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    diagnostics: &mut D,
) -> PipelineResult<PipelineReport>
where
    D: Diagnostics + ?Sized,
{
    let input = input.as_ref();
    let output = output.as_ref();
    let started_at = Instant::now();
    info!(
        "event=pipeline_run module=pipeline status=start input={} output={}",
        input.display(),
        output.display()
    );

    match run_steps(input, output, diagnostics) {
        Ok(report) => {
            info!(
                "event=pipeline_run module=pipeline status=ok duration_ms={} classes_seen={} classes_skipped={} records={} virtual_groups={} non_virtual_groups={}",
                started_at.elapsed().as_millis(),
                report.classes_seen,
                report.classes_skipped,
                report.records,
                report.virtual_groups,
                report.non_virtual_groups
            );
            Ok(report)
        }
        Err(err) => {
            let duration_ms = started_at.elapsed().as_millis();
            if err.logged_by_stage() {
                debug!(
                    "event=pipeline_run module=pipeline status=error duration_ms={} error_code={}",
                    duration_ms,
                    err.code()
                );
            } else {
                error!(
                    "event=pipeline_run module=pipeline status=error duration_ms={} error_code={} error={}",
                    duration_ms,
                    err.code(),
                    err
                );
            }
            Err(err)
        }
    }
}

fn run_steps<D>(input: &Path, output: &Path, diagnostics: &mut D) -> PipelineResult<PipelineReport>
where
    D: Diagnostics + ?Sized,
{
    let document = read_document(input)?;
    let (regrouped, report) = transform_document(&document, diagnostics)?;
    write_document(output, &regrouped)?;
    Ok(report)
}
