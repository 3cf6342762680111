//! Null-row removal.

use crate::types::Value;

/// Drops every row that contains at least one [`Value::Missing`].
///
/// Returns the kept rows (in order) and the number of rows removed.
pub fn drop_missing_rows(rows: Vec<Vec<Value>>) -> (Vec<Vec<Value>>, usize) {
    let before = rows.len();
    let kept: Vec<Vec<Value>> = rows
        .into_iter()
        .filter(|row| !row.iter().any(Value::is_missing))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
