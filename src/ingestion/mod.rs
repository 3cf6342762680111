//! Load entrypoints and format-specific parsers.
//!
//! Most callers should use [`load_and_clean`] (from [`unified`]) which:
//!
//! - picks a parser from the file name extension (or you can override via [`LoadOptions`])
//! - parses the bytes into a [`crate::types::RawTable`]
//! - runs the [`crate::cleaning`] pipeline
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (requires the `excel` feature)

pub mod cells;
pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use cells::DEFAULT_NULL_VALUES;
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    LogObserver, StdErrObserver,
};
pub use unified::{
    load_and_clean, load_and_clean_with_options, read_raw, ExcelSheetSelection, FileFormat,
    LoadOptions,
};
