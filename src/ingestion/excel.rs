#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::{LoadError, LoadResult};
use crate::types::{RawTable, Value};

use super::cells::{normalize_headers, text_cell};
use super::unified::ExcelSheetSelection;

/// Parse an in-memory `.xlsx` workbook into a [`RawTable`].
///
/// Behavior:
/// - Picks the sheet named by `sheet`, or the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Converts remaining rows into [`Value`]s: numbers stay numbers, text goes through the
///   null-sentinel check, booleans and dates become text, empty/error cells are missing
///
/// A sheet with no non-empty rows yields an empty table.
pub fn read_xlsx_bytes(
    bytes: &[u8],
    sheet: &ExcelSheetSelection,
    null_values: &[String],
) -> LoadResult<RawTable> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = match sheet {
        ExcelSheetSelection::First => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::parse("workbook has no sheets"))?,
        ExcelSheetSelection::Sheet(name) => name.clone(),
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    read_sheet_range(&range, null_values).map_err(|e| wrap_err_with_sheet(&sheet_name, e))
}

fn read_sheet_range(range: &Range<Data>, null_values: &[String]) -> LoadResult<RawTable> {
    let Some(header_row_idx) = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
    else {
        return Ok(RawTable::new(Vec::new(), Vec::new()));
    };

    let mut rows_iter = range.rows().skip(header_row_idx);
    let header_cells: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(cell_to_header_string).collect())
        .unwrap_or_default();
    let columns = normalize_headers(&header_cells);
    let width = columns.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for row in rows_iter {
        let mut out_row: Vec<Value> = row
            .iter()
            .take(width)
            .map(|c| convert_cell(c, null_values))
            .collect();
        out_row.resize(width, Value::Missing);
        rows.push(out_row);
    }

    Ok(RawTable::new(columns, rows))
}

fn wrap_err_with_sheet(sheet: &str, err: LoadError) -> LoadError {
    match err {
        LoadError::ParseFailure { message } => LoadError::ParseFailure {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => c.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

/// Numeric cells keep their number; strings go through the null-sentinel check; booleans and
/// dates become text; empty and error cells are missing.
fn convert_cell(c: &Data, null_values: &[String]) -> Value {
    match c {
        Data::Empty | Data::Error(_) => Value::Missing,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) if f.is_nan() => Value::Missing,
        Data::Float(f) => Value::Number(*f),
        Data::String(s) => text_cell(s, null_values),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::DateTime(_) => Value::Text(c.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
