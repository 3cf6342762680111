//! Cleaning pipeline: [`RawTable`] → [`CleanedTable`] + [`CleaningReport`].
//!
//! Steps run in this order, and each is available on its own:
//!
//! - [`drop_missing_rows()`]: drop every row with at least one missing value
//! - [`coerce_column()`]: per-column numeric coercion
//! - [`drop_duplicate_rows()`]: collapse identical rows to their first occurrence
//!
//! ## Example
//!
//! ```rust
//! use tabular_glance::cleaning::clean;
//! use tabular_glance::types::{DataType, RawTable, Value};
//!
//! let text = |s: &str| Value::Text(s.to_string());
//! let raw = RawTable::new(
//!     vec!["city".to_string(), "sales".to_string()],
//!     vec![
//!         vec![text("Lima"), text("10")],
//!         vec![text("Quito"), Value::Missing],
//!         vec![text("Lima"), text("10")],
//!         vec![text("Cusco"), text("7.5")],
//!     ],
//! );
//!
//! let (table, report) = clean(raw);
//! assert_eq!(report.rows_removed_for_nulls, 1);
//! assert_eq!(report.rows_removed_for_duplicates, 1);
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.field("sales").unwrap().data_type, DataType::Numeric);
//! assert_eq!(table.field("city").unwrap().data_type, DataType::Text);
//! ```

pub mod coerce;
pub mod dedup;
pub mod nulls;

pub use coerce::{coerce_column, parse_number};
pub use dedup::drop_duplicate_rows;
pub use nulls::drop_missing_rows;

use crate::types::{CleanedTable, CleaningReport, Field, RawTable, Schema, Value};

/// Runs the full cleaning pipeline.
///
/// Rows longer than the column list are truncated and shorter rows are padded with
/// [`Value::Missing`] (and therefore dropped as null rows).
pub fn clean(raw: RawTable) -> (CleanedTable, CleaningReport) {
    let RawTable { columns, mut rows } = raw;
    let width = columns.len();
    let rows_before = rows.len();
    for row in &mut rows {
        row.resize(width, Value::Missing);
    }

    let (mut rows, rows_removed_for_nulls) = drop_missing_rows(rows);
    let types = coerce::coerce_columns(width, &mut rows);
    let (rows, rows_removed_for_duplicates) = drop_duplicate_rows(rows);

    let schema = Schema::new(
        columns
            .into_iter()
            .zip(types)
            .map(|(name, data_type)| Field::new(name, data_type))
            .collect(),
    );
    let report = CleaningReport {
        rows_before,
        rows_removed_for_nulls,
        rows_removed_for_duplicates,
        rows_after: rows.len(),
    };
    (CleanedTable::from_parts(schema, rows), report)
}

#[cfg(test)]
mod tests {
    use super::clean;
    use crate::types::{DataType, RawTable, Value};

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn duplicates_are_detected_after_coercion() {
        // "1" and "1.0" only match once the column is numeric.
        let raw = RawTable::new(
            vec!["n".to_string()],
            vec![vec![text("1")], vec![text("1.0")], vec![text("2")]],
        );
        let (table, report) = clean(raw);
        assert_eq!(report.rows_removed_for_duplicates, 1);
        assert_eq!(table.rows(), &[vec![Value::Number(1.0)], vec![Value::Number(2.0)]]);
    }

    #[test]
    fn ragged_rows_are_normalised() {
        let raw = RawTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![text("x")], vec![text("y"), text("z"), text("extra")]],
        );
        let (table, report) = clean(raw);
        assert_eq!(report.rows_removed_for_nulls, 1);
        assert_eq!(table.rows(), &[vec![text("y"), text("z")]]);
    }

    #[test]
    fn empty_table_keeps_columns() {
        let raw = RawTable::new(vec!["a".to_string()], Vec::new());
        let (table, report) = clean(raw);
        assert_eq!(table.shape(), (0, 1));
        assert_eq!(table.schema().fields[0].data_type, DataType::Numeric);
        assert_eq!(report.rows_before, 0);
        assert_eq!(report.rows_after, 0);
    }
}
