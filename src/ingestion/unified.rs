//! Unified load entrypoint.
//!
//! Most callers should use [`load_and_clean`], which parses an uploaded file into a
//! [`crate::types::RawTable`] and runs the [`crate::cleaning`] pipeline over it.
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file name extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::cleaning::clean;
use crate::error::{LoadError, LoadResult};
use crate::types::{CleanedTable, CleaningReport, RawTable};

use super::cells::DEFAULT_NULL_VALUES;
use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    /// Delimited text, UTF-8.
    Csv,
    /// Office Open XML workbook (feature-gated behind `excel`).
    Xlsx,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

/// Which sheet to read from an `.xlsx` workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcelSheetSelection {
    /// Read the first sheet (default).
    #[default]
    First,
    /// Read a single named sheet.
    Sheet(String),
}

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file name extension.
    pub format: Option<FileFormat>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Field delimiter for CSV input.
    pub delimiter: u8,
    /// Cell texts treated as missing (compared after trimming). Blank cells are always missing.
    pub null_values: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("delimiter", &(self.delimiter as char))
            .field("null_values", &self.null_values.len())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            observer: None,
            alert_at_or_above: LoadSeverity::Error,
        }
    }
}

/// Parse and clean an uploaded file with default options.
///
/// ```rust
/// use tabular_glance::ingestion::load_and_clean;
///
/// # fn main() -> Result<(), tabular_glance::LoadError> {
/// let csv = b"name,score\nAda,9\nGrace,\nAda,9\nLin,7\n";
/// let (table, report) = load_and_clean(csv, "scores.csv")?;
/// assert_eq!(report.rows_removed_for_nulls, 1);
/// assert_eq!(report.rows_removed_for_duplicates, 1);
/// assert_eq!(table.shape(), (2, 2));
/// # Ok(())
/// # }
/// ```
pub fn load_and_clean(
    file_bytes: &[u8],
    file_name: &str,
) -> LoadResult<(CleanedTable, CleaningReport)> {
    load_and_clean_with_options(file_bytes, file_name, &LoadOptions::default())
}

/// Parse and clean an uploaded file.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts and the cleaning report
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn load_and_clean_with_options(
    file_bytes: &[u8],
    file_name: &str,
    options: &LoadOptions,
) -> LoadResult<(CleanedTable, CleaningReport)> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_name(file_name),
    };

    let ctx = LoadContext {
        file_name: file_name.to_owned(),
        format: format.as_ref().ok().copied(),
    };

    let result = format
        .and_then(|fmt| read_raw(file_bytes, fmt, options))
        .map(|raw| {
            let raw_rows = raw.row_count();
            let (table, report) = clean(raw);
            (raw_rows, table, report)
        });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((raw_rows, table, report)) => obs.on_success(
                &ctx,
                LoadStats {
                    raw_rows: *raw_rows,
                    rows: table.row_count(),
                    columns: table.column_count(),
                    report: *report,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(_, table, report)| (table, report))
}

/// Parse an uploaded file into a [`RawTable`] without cleaning it.
pub fn read_raw(file_bytes: &[u8], format: FileFormat, options: &LoadOptions) -> LoadResult<RawTable> {
    match format {
        FileFormat::Csv => csv::read_csv_bytes(file_bytes, options.delimiter, &options.null_values),
        FileFormat::Xlsx => read_xlsx_dispatch(file_bytes, options),
    }
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::UnsupportedFormat { .. } => LoadSeverity::Warning,
        LoadError::ParseFailure { .. } => LoadSeverity::Error,
    }
}

fn infer_format_from_name(file_name: &str) -> LoadResult<FileFormat> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoadError::UnsupportedFormat {
            message: format!("cannot infer format: '{file_name}' has no extension (expected .csv or .xlsx)"),
        })?;

    FileFormat::from_extension(ext).ok_or_else(|| LoadError::UnsupportedFormat {
        message: format!("extension '.{ext}' of '{file_name}' is not supported (expected .csv or .xlsx)"),
    })
}

fn read_xlsx_dispatch(file_bytes: &[u8], options: &LoadOptions) -> LoadResult<RawTable> {
    // Avoid unused warnings when the feature is off.
    let _ = (file_bytes, options);

    #[cfg(feature = "excel")]
    {
        super::excel::read_xlsx_bytes(
            file_bytes,
            &options.excel_sheet_selection,
            &options.null_values,
        )
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(LoadError::UnsupportedFormat {
            message: "xlsx loading not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
