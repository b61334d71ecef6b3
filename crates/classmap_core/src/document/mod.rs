//! JSON document read/write boundary.
//!
//! # Responsibility
//! - Load class documents from disk into the input model.
//! - Persist the regrouped output document.
//!
//! # Invariants
//! - Every failure is returned as a typed `DocumentError` and logged once at
//!   error level; nothing is swallowed.
//! - Files are closed on every exit path (ownership-scoped handles).
//! - Output is staged in a sibling temp file and renamed into place, so a
//!   failed write never leaves a truncated document at the output path.

use crate::model::input::InputDocument;
use crate::model::output::OutputDocument;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Input path used when the caller does not configure one.
pub const DEFAULT_INPUT_PATH: &str = "data/ex2.json";
/// Output path used when the caller does not configure one.
pub const DEFAULT_OUTPUT_PATH: &str = "data/result.json";

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Error for document load/store operations.
#[derive(Debug)]
pub enum DocumentError {
    /// Input file cannot be opened or read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Input file content is not a valid class document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Output file cannot be created or written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "input_read_failed",
            Self::Parse { .. } => "input_parse_failed",
            Self::Write { .. } => "output_write_failed",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Reads and decodes a class document.
///
/// # Errors
/// - `DocumentError::Read` when the file cannot be opened or read.
/// - `DocumentError::Parse` when the content is not JSON of the expected shape.
pub fn read_document(path: impl AsRef<Path>) -> DocumentResult<InputDocument> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let result = decode_file(path);
    match &result {
        Ok(document) => info!(
            "event=document_read module=document status=ok path={} classes={} duration_ms={}",
            path.display(),
            document.classes.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => log_failure("document_read", err, started_at),
    }
    result
}

/// Encodes and writes the output document, creating parent directories.
///
/// # Errors
/// - `DocumentError::Write` when the directory, file or flush fails.
pub fn write_document(path: impl AsRef<Path>, document: &OutputDocument) -> DocumentResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let result = encode_file(path, document);
    match &result {
        Ok(()) => info!(
            "event=document_write module=document status=ok path={} duration_ms={}",
            path.display(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => log_failure("document_write", err, started_at),
    }
    result
}

fn decode_file(path: &Path) -> DocumentResult<InputDocument> {
    let file = File::open(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        // Underlying I/O failures surface through serde_json as io-category errors.
        if source.is_io() {
            DocumentError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn encode_file(path: &Path, document: &OutputDocument) -> DocumentResult<()> {
    let write_err = |source: std::io::Error| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent).map_err(write_err)?;
            parent
        }
        None => Path::new("."),
    };

    // Dropping the temp file on any early return removes it.
    let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(&mut staged);
        serde_json::to_writer(&mut writer, document)
            .map_err(|source| write_err(source.into()))?;
        writer.flush().map_err(write_err)?;
    }
    staged.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

fn log_failure(event: &str, err: &DocumentError, started_at: Instant) {
    error!(
        "event={} module=document status=error path={} duration_ms={} error_code={} error={}",
        event,
        err.path().display(),
        started_at.elapsed().as_millis(),
        err.code(),
        err
    );
}
