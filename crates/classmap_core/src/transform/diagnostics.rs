//! Diagnostics capability handed to the transformation stages.
//!
//! The flattener reports skipped classes through this trait instead of
//! writing to the global logger, so it can be exercised without logging
//! being initialized.

use log::warn;

/// Receiver for non-fatal transformation findings.
pub trait Diagnostics {
    /// Called once per class whose key does not match its declared id.
    fn key_mismatch(&mut self, key: &str, id: i64);
}

/// Forwards findings to the `log` facade at warning level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn key_mismatch(&mut self, key: &str, id: i64) {
        warn!("event=key_mismatch module=transform status=skipped key={key} id={id}");
    }
}

/// Key/id pair of a skipped class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMismatch {
    pub key: String,
    pub id: i64,
}

/// Keeps findings in memory, optionally forwarding them to another sink.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics<D = NoopDiagnostics> {
    mismatches: Vec<KeyMismatch>,
    inner: D,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Diagnostics> RecordingDiagnostics<D> {
    /// Records findings and also passes each one on to `inner`.
    pub fn forwarding(inner: D) -> Self {
        Self {
            mismatches: Vec::new(),
            inner,
        }
    }

    pub fn mismatches(&self) -> &[KeyMismatch] {
        &self.mismatches
    }

    pub fn into_mismatches(self) -> Vec<KeyMismatch> {
        self.mismatches
    }
}

impl<D: Diagnostics> Diagnostics for RecordingDiagnostics<D> {
    fn key_mismatch(&mut self, key: &str, id: i64) {
        self.mismatches.push(KeyMismatch {
            key: key.to_string(),
            id,
        });
        self.inner.key_mismatch(key, id);
    }
}

/// Discards every finding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn key_mismatch(&mut self, _key: &str, _id: i64) {}
}

impl<T: Diagnostics + ?Sized> Diagnostics for &mut T {
    fn key_mismatch(&mut self, key: &str, id: i64) {
        (**self).key_mismatch(key, id);
    }
}
