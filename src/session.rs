//! Caller-owned session context.
//!
//! The core functions are stateless; a UI that needs to remember "what is loaded and what was
//! asked for" keeps a [`Session`] and drives it explicitly:
//!
//! ```text
//! Idle --upload--> Loaded --request_chart--> ChartRequested --mark_rendered--> Rendered
//!   ^                 |                          |                                |
//!   +------clear------+--------------------------+--------------------------------+
//! ```
//!
//! A new `upload` from any state replaces the table wholesale; a failed upload leaves the
//! session `Idle`.
//!
//! ```rust
//! use tabular_glance::charts::{ChartKind, ChartRequest};
//! use tabular_glance::session::{Session, SessionState};
//!
//! # fn main() -> Result<(), tabular_glance::SessionError> {
//! let mut session = Session::new();
//! session.upload(b"city,sales\nLima,3\nQuito,5\n", "sales.csv")?;
//! assert_eq!(session.state(), SessionState::Loaded);
//!
//! session.request_chart(ChartRequest::new(ChartKind::BarChart).with_x("city"))?;
//! session.mark_rendered();
//! assert_eq!(session.state(), SessionState::Rendered);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::cache::LoadCache;
use crate::charts::{build_chart, ChartRequest, ChartSeries};
use crate::error::SessionError;
use crate::ingestion::LoadOptions;
use crate::summary::{summarize, TableSummary};
use crate::types::{CleanedTable, CleaningReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing loaded.
    Idle,
    /// A cleaned table is available.
    Loaded,
    /// A chart was built and is waiting to be drawn.
    ChartRequested,
    /// The last chart was drawn.
    Rendered,
}

/// Holds at most one cleaned table plus the last chart built from it.
#[derive(Debug)]
pub struct Session {
    options: LoadOptions,
    cache: LoadCache,
    state: SessionState,
    file_name: Option<String>,
    table: Option<CleanedTable>,
    report: CleaningReport,
    last_chart: Option<(ChartRequest, ChartSeries)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    /// A session whose uploads use `options`.
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            cache: LoadCache::default(),
            state: SessionState::Idle,
            file_name: None,
            table: None,
            report: CleaningReport::default(),
            last_chart: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn table(&self) -> Option<&CleanedTable> {
        self.table.as_ref()
    }

    /// Report of the current table (all zeros while idle).
    pub fn report(&self) -> CleaningReport {
        self.report
    }

    pub fn last_chart(&self) -> Option<&(ChartRequest, ChartSeries)> {
        self.last_chart.as_ref()
    }

    /// Loads and cleans an upload, replacing whatever was loaded before.
    ///
    /// Re-uploading identical content is served from the session's cache.
    pub fn upload(
        &mut self,
        file_bytes: &[u8],
        file_name: &str,
    ) -> Result<(&CleanedTable, CleaningReport), SessionError> {
        self.clear();
        let (table, report) = self
            .cache
            .load_and_clean(file_bytes, file_name, &self.options)?;

        self.file_name = Some(file_name.to_owned());
        self.report = report;
        self.state = SessionState::Loaded;
        let table = self.table.insert(table);
        Ok((table, report))
    }

    /// Forgets the current table (the upload was removed).
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
        self.file_name = None;
        self.table = None;
        self.report = CleaningReport::default();
        self.last_chart = None;
    }

    /// Summary of the loaded table.
    pub fn summary(&self, head_rows: usize) -> Result<TableSummary, SessionError> {
        let table = self.table.as_ref().ok_or(SessionError::NoTable)?;
        Ok(summarize(table, head_rows))
    }

    /// Validates and builds a chart from the loaded table.
    ///
    /// On a validation error the state and the previous chart are left untouched.
    pub fn request_chart(&mut self, request: ChartRequest) -> Result<&ChartSeries, SessionError> {
        let table = self.table.as_ref().ok_or(SessionError::NoTable)?;
        let series = build_chart(table, &request)?;
        self.state = SessionState::ChartRequested;
        let (_, series) = self.last_chart.insert((request, series));
        Ok(series)
    }

    /// Records that the last requested chart was drawn.
    ///
    /// Does nothing unless a chart is pending.
    pub fn mark_rendered(&mut self) {
        if self.state == SessionState::ChartRequested {
            self.state = SessionState::Rendered;
        }
    }
}
