//! `tabular-glance` is the core of an "upload a spreadsheet, look at it" app: it turns an
//! uploaded CSV/XLSX file into a cleaned in-memory table and builds validated, render-ready
//! chart data from it. It has no UI of its own; a UI layer calls in with raw bytes and chart
//! selections and gets back data or a typed error to display.
//!
//! The primary entrypoints are [`ingestion::load_and_clean`] and [`charts::build_chart`].
//!
//! ## What you can load
//!
//! **File formats (picked by file name extension):**
//!
//! - **CSV**: `.csv` (UTF-8)
//! - **Excel** (requires the default Cargo feature `excel`): `.xlsx`
//!
//! Anything else is [`LoadError::UnsupportedFormat`]; undecodable content is
//! [`LoadError::ParseFailure`].
//!
//! **Cleaning** (see [`cleaning`]) runs three steps and reports what each removed:
//!
//! 1. drop rows with any missing value
//! 2. per-column numeric coercion: a column becomes [`types::DataType::Numeric`] only if every
//!    value parses as a number, otherwise it stays [`types::DataType::Text`]
//! 3. drop exact duplicate rows, keeping the first
//!
//! ## Quick example
//!
//! ```rust
//! use tabular_glance::charts::{build_chart, ChartKind, ChartRequest, ChartSeries};
//! use tabular_glance::ingestion::load_and_clean;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let csv = b"region,units,price\nnorth,3,9.5\nsouth,,4\nnorth,3,9.5\neast,7,2.25\n";
//! let (table, report) = load_and_clean(csv, "orders.csv")?;
//! assert_eq!(report.rows_removed_for_nulls, 1);
//! assert_eq!(report.rows_removed_for_duplicates, 1);
//! assert_eq!(table.shape(), (2, 3));
//!
//! let request = ChartRequest::new(ChartKind::BarChart).with_x("region").with_y("units");
//! match build_chart(&table, &request)? {
//!     ChartSeries::BarChart(bars) => assert_eq!(bars.bars.len(), 2),
//!     other => panic!("unexpected series {other:?}"),
//! }
//!
//! // Text columns cannot be scattered.
//! let bad = ChartRequest::new(ChartKind::ScatterPlot).with_x("region");
//! assert!(build_chart(&table, &bad).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: load entrypoints, CSV/XLSX parsers, observers
//! - [`cleaning`]: null removal, coercion, duplicate removal
//! - [`charts`]: chart request validation and series construction
//! - [`summary`]: shape, preview rows and descriptive statistics
//! - [`cache`]: load memoisation by exact upload identity
//! - [`session`]: caller-owned session context
//! - [`types`]: table and value types
//! - [`error`]: error types

pub mod cache;
pub mod charts;
pub mod cleaning;
pub mod error;
pub mod ingestion;
pub mod session;
mod stats;
pub mod summary;
pub mod types;

pub use error::{ChartError, ChartResult, LoadError, LoadResult, SessionError};
