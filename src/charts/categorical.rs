use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ChartError, ChartResult};
use crate::stats::mean;
use crate::types::{CleanedTable, Field, Value};

/// Maximum number of slices in a pie chart; less frequent values are left out.
pub const PIE_MAX_SLICES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Category label (the value rendered as text).
    pub label: String,
    pub count: usize,
    /// `count` divided by the total count of the slices shown.
    pub share: f64,
}

/// Most frequent values of one column, most frequent first.
///
/// Ties keep the order in which the values first appear in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub column: String,
    pub slices: Vec<PieSlice>,
}

/// What the bar heights mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarAggregate {
    /// Number of rows per category.
    Count,
    /// Mean of `y_column` per category.
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// One bar per distinct `x_column` value.
///
/// Bars are ordered ascending for a numeric `x_column` and by first appearance for text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub x_column: String,
    pub y_column: Option<String>,
    pub aggregate: BarAggregate,
    pub bars: Vec<Bar>,
}

/// Distinct values of one column with the row indexes holding them, in first-appearance order.
fn group_rows<'a>(table: &'a CleanedTable, idx: usize) -> Vec<(&'a Value, Vec<usize>)> {
    let mut positions = HashMap::new();
    let mut groups: Vec<(&Value, Vec<usize>)> = Vec::new();
    for (row_idx, value) in table.column_values(idx).enumerate() {
        let slot = *positions.entry(value.key()).or_insert_with(|| {
            groups.push((value, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row_idx);
    }
    groups
}

pub(super) fn pie(table: &CleanedTable, idx: usize, field: &Field) -> ChartResult<PieSeries> {
    let mut counts: Vec<(String, usize)> = group_rows(table, idx)
        .into_iter()
        .map(|(value, rows)| (value.to_string(), rows.len()))
        .collect();
    // Stable sort keeps first-seen ordering for tied counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(PIE_MAX_SLICES);

    if counts.is_empty() {
        return Err(ChartError::EmptyCategory {
            column: field.name.clone(),
        });
    }

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let slices = counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label,
            count,
            share: count as f64 / total as f64,
        })
        .collect();

    Ok(PieSeries {
        column: field.name.clone(),
        slices,
    })
}

pub(super) fn bar(
    table: &CleanedTable,
    (x_idx, x_field): (usize, &Field),
    y: Option<(usize, &Field)>,
) -> BarSeries {
    let mut groups = group_rows(table, x_idx);
    if x_field.is_numeric() {
        groups.sort_by(|a, b| {
            let (a, b) = (a.0.as_number(), b.0.as_number());
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
    }

    let rows = table.rows();
    let bars = groups
        .into_iter()
        .map(|(value, members)| {
            let height = match y {
                Some((y_idx, _)) => {
                    let ys: Vec<f64> = members
                        .iter()
                        .filter_map(|&r| rows[r].get(y_idx).and_then(Value::as_number))
                        .collect();
                    mean(&ys).unwrap_or(0.0)
                }
                None => members.len() as f64,
            };
            Bar {
                label: value.to_string(),
                value: height,
            }
        })
        .collect();

    BarSeries {
        x_column: x_field.name.clone(),
        y_column: y.map(|(_, f)| f.name.clone()),
        aggregate: if y.is_some() {
            BarAggregate::Mean
        } else {
            BarAggregate::Count
        },
        bars,
    }
}
