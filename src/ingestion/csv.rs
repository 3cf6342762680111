//! CSV parsing into a [`RawTable`].

use crate::error::{LoadError, LoadResult};
use crate::types::{RawTable, Value};

use super::cells::{normalize_headers, text_cell};

/// Parse UTF-8 CSV bytes into a [`RawTable`].
///
/// Rules:
///
/// - the input must be valid UTF-8 (a leading BOM is ignored)
/// - the first record is the header row
/// - see [`read_csv_from_reader`] for row handling
pub fn read_csv_bytes(bytes: &[u8], delimiter: u8, null_values: &[String]) -> LoadResult<RawTable> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    read_csv_from_reader(&mut rdr, null_values)
}

/// Read CSV data from an existing CSV reader.
///
/// The reader should be `flexible` so short rows reach us instead of failing inside `csv`:
///
/// - rows with fewer fields than the header are padded with [`Value::Missing`]
/// - rows with more fields than the header fail the whole parse
/// - cells are trimmed; blanks and `null_values` become [`Value::Missing`], everything else
///   stays [`Value::Text`] until cleaning coerces it
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    null_values: &[String],
) -> LoadResult<RawTable> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::parse("no columns to parse from file"));
    }
    let columns = normalize_headers(headers.iter());
    let width = columns.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() > width {
            // 1-based line number; +1 again because the header is line 1.
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx0 + 2);
            return Err(LoadError::parse(format!(
                "expected {width} fields in line {line}, saw {}",
                record.len()
            )));
        }

        let mut row: Vec<Value> = Vec::with_capacity(width);
        for raw in record.iter() {
            row.push(text_cell(raw, null_values));
        }
        row.resize(width, Value::Missing);
        rows.push(row);
    }

    Ok(RawTable::new(columns, rows))
}
