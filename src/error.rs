use thiserror::Error;

use crate::charts::ChartKind;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for chart building.
pub type ChartResult<T> = Result<T, ChartError>;

/// Error type returned by [`crate::ingestion::load_and_clean`] and friends.
///
/// Both variants abort the whole load; no partial table is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The file extension (or forced format) is not one we can parse.
    #[error("unsupported file format: {message}")]
    UnsupportedFormat { message: String },

    /// The file content could not be decoded or parsed.
    #[error("failed to parse file: {message}")]
    ParseFailure { message: String },
}

impl LoadError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        Self::parse(format!("csv: {e}"))
    }
}

impl From<std::str::Utf8Error> for LoadError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::parse(format!("file is not valid UTF-8: {e}"))
    }
}

#[cfg(feature = "excel")]
impl From<calamine::XlsxError> for LoadError {
    fn from(e: calamine::XlsxError) -> Self {
        Self::parse(format!("xlsx: {e}"))
    }
}

/// Validation error returned by [`crate::charts::build_chart`].
///
/// Every variant is meant to be shown to the user as-is; no chart is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A chart kind that needs `column_x` was requested without one.
    #[error("{kind} requires at least one selected column")]
    MissingSelection { kind: ChartKind },

    /// A selected column is not part of the table.
    #[error("column '{column}' does not exist in the dataset")]
    UnknownColumn { column: String },

    /// The heatmap needs two or more numeric columns.
    #[error("the dataset must contain at least 2 numeric columns (found {found})")]
    InsufficientNumericColumns { found: usize },

    /// A column that must be numeric for this chart kind is text.
    #[error("{kind} requires numeric columns, but '{column}' is text")]
    NonNumericColumn { kind: ChartKind, column: String },

    /// The selected column has no values to count.
    #[error("column '{column}' has no valid values")]
    EmptyCategory { column: String },

    /// The chart-kind string did not name a known chart.
    #[error("unknown chart kind '{name}'")]
    UnknownChartKind { name: String },
}

/// Error type returned by [`crate::session::Session`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No file has been loaded into the session yet.
    #[error("no dataset loaded; upload a CSV or XLSX file first")]
    NoTable,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
