use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LoadError;
use crate::types::CleaningReport;

use super::unified::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (the user picked a file we do not handle).
    Warning,
    /// Error-level event (the file could not be parsed).
    Error,
    /// Critical error (reserved for infrastructure failures in caller-provided observers).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// File name as uploaded.
    pub file_name: String,
    /// Format used for parsing; `None` when it could not be determined.
    pub format: Option<FileFormat>,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows parsed from the file.
    pub raw_rows: usize,
    /// Rows left after cleaning.
    pub rows: usize,
    /// Column count.
    pub columns: usize,
    /// Per-step removal counts.
    pub report: CleaningReport,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] format={:?} file={} rows={} nulls_removed={} duplicates_removed={}",
            ctx.format,
            ctx.file_name,
            stats.rows,
            stats.report.rows_removed_for_nulls,
            stats.report.rows_removed_for_duplicates
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!(
            "[load][{:?}] format={:?} file={} err={}",
            severity, ctx.format, ctx.file_name, error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!(
            "[ALERT][load][{:?}] format={:?} file={} err={}",
            severity, ctx.format, ctx.file_name, error
        );
    }
}

/// Forwards load events to the [`log`] facade under the `tabular_glance::load` target.
///
/// Successes log at `info`, failures at `warn`/`error` depending on severity.
#[derive(Debug, Default)]
pub struct LogObserver;

const LOG_TARGET: &str = "tabular_glance::load";

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            target: LOG_TARGET,
            "loaded {} ({:?}): {} of {} rows kept, {} with nulls removed, {} duplicates removed",
            ctx.file_name,
            ctx.format,
            stats.rows,
            stats.raw_rows,
            stats.report.rows_removed_for_nulls,
            stats.report.rows_removed_for_duplicates
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        let level = match severity {
            LoadSeverity::Info => log::Level::Info,
            LoadSeverity::Warning => log::Level::Warn,
            LoadSeverity::Error | LoadSeverity::Critical => log::Level::Error,
        };
        log::log!(target: LOG_TARGET, level, "failed to load {}: {}", ctx.file_name, error);
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        log::error!(
            target: LOG_TARGET,
            "ALERT ({severity:?}) loading {}: {}",
            ctx.file_name,
            error
        );
    }
}

/// Appends load events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok format={:?} file={} raw_rows={} rows={} nulls_removed={} duplicates_removed={}",
            unix_ts(),
            ctx.format,
            ctx.file_name,
            stats.raw_rows,
            stats.rows,
            stats.report.rows_removed_for_nulls,
            stats.report.rows_removed_for_duplicates
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.file_name,
            error
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.file_name,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
