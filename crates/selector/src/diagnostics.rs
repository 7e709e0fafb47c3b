//! Diagnostics sinks
//!
//! A filtering pass never fails because of one resource. Instead, resources
//! whose tags cannot be extracted are reported to a [`DiagnosticsSink`] and
//! the pass moves on. Sinks take `&self` so workers can report concurrently.

use crate::error::ExtractionError;
use std::fmt;
use std::sync::Mutex;

/// Log target used for diagnostics forwarded to the `log` facade
pub const LOG_TARGET: &str = "selector::engine";

/// A non-fatal problem with one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: log::Level,
    pub resource_type: String,
    pub resource_id: String,
    pub error: ExtractionError,
}

impl Diagnostic {
    /// Diagnostic for a failed tag extraction
    pub fn extraction_failed(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        error: ExtractionError,
    ) -> Self {
        Self {
            level: log::Level::Debug,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            error,
        }
    }

    /// Message describing the problem
    pub fn message(&self) -> String {
        format!("failed to get tags: {}", self.error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: {}",
            self.resource_type,
            self.resource_id,
            self.message()
        )
    }
}

/// Receiver for non-fatal, per-resource problems
pub trait DiagnosticsSink: Send + Sync {
    /// Record one diagnostic
    fn record(&self, diagnostic: Diagnostic);
}

/// Sink forwarding every diagnostic to the `log` facade
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn record(&self, diagnostic: Diagnostic) {
        log::log!(
            target: LOG_TARGET,
            diagnostic.level,
            "{} (type={}, id={})",
            diagnostic.message(),
            diagnostic.resource_type,
            diagnostic.resource_id
        );
    }
}

/// Sink discarding everything
pub struct NoDiagnostics;

impl DiagnosticsSink for NoDiagnostics {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Sink keeping every diagnostic in memory
#[derive(Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the diagnostics recorded so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Number of diagnostics recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking recorder cannot leave a Vec half-pushed
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DiagnosticsSink for CollectingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
