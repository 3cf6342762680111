//! Duplicate-row removal.

use std::collections::HashSet;

use crate::types::Value;

/// Collapses rows that are identical across all values to their first occurrence.
///
/// Returns the kept rows (in order) and the number of rows removed.
pub fn drop_duplicate_rows(rows: Vec<Vec<Value>>) -> (Vec<Vec<Value>>, usize) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.iter()
            .map(|row| seen.insert(row.iter().map(Value::key).collect::<Vec<_>>()))
            .collect()
    };

    let before = rows.len();
    let kept: Vec<Vec<Value>> = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
